//! Version command

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{info}");
    if let Some(commit) = &info.commit {
        output::kv("commit", commit);
    }
    if let Some(date) = &info.build_date {
        output::kv("built", date);
    }
    if let Some(target) = &info.target {
        output::kv("target", target);
    }

    Ok(())
}
