use anyhow::Result;
use mend_core::configs::TargetsFileConfig;

pub fn execute() -> Result<()> {
    let schema = schemars::schema_for!(TargetsFileConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
