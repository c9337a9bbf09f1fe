use mathconv::{Expression, Value};

fn main() {
    pretty_env_logger::init();

    let expression = Expression::parse("(a + b) / 2 - {2}").expect("Failed to parse");
    println!("AST: {:#?}", expression.root());
    println!("Highest argument index: {:?}", expression.max_argument_index());

    let args = [Value::from(120.0), Value::from("30"), Value::from(true)];

    match expression.evaluate(&args) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
