use medi_insure::{
    assess, build_and_predict, DisplayConfig, LinearCostModel, PredictionReport, Subject,
};
use serde_json::json;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Model artifact, loaded once
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/linear_cost_model.json");
    let model = LinearCostModel::load(path)?;

    // Raw form record
    let subject = Subject::from_json(&json!({
        "age": 52,
        "bmi": 29.4,
        "children": 3,
        "sex": "female",
        "smoker": "no",
        "region": "northwest",
    }))?;

    let breakdown = assess(subject.age, subject.bmi, subject.smoker, subject.children);
    for c in &breakdown.contributions {
        println!("{:?}: {} -> +{}", c.factor, c.measured, c.points);
    }

    let result = build_and_predict(&subject, &model)?;
    let report = PredictionReport::new(&result, &DisplayConfig::default());
    println!("{}", report.to_json()?);
    Ok(())
}
