use log::debug;
use mathconv::{MathEngine, OutputKind, Value};

fn main() {
    pretty_env_logger::init();

    let engine = MathEngine::new();

    let expressions = ["{0}+{1}*2", "(x+y)/2", "-x * 3", "2 + 3 * 4"];
    let args = [Value::from(5), Value::from(3)];

    for expression in expressions {
        match engine.evaluate_as(expression, &args, OutputKind::Text) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{} failed: {}", expression, err),
        }
    }

    debug!("cached expressions: {}", engine.cache().len());

    if let Err(err) = engine.evaluate("2 +", &args) {
        println!("Error: {}", err);
    }
}
