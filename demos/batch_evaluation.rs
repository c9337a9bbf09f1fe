use mathconv::MathEngine;

fn main() {
    pretty_env_logger::init();

    let rows = vec![vec![120.0, 3000.0], vec![80.0, 6000.0], vec![95.5, 0.0]];

    let expression = "x * y / 1000";

    let engine = MathEngine::new();
    let results = engine
        .evaluate_batch(expression, &rows)
        .expect("Failed to parse");
    for (i, result) in results.iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
