use anyhow::Result;

use crate::{cargo, PACKAGE};

/// Feature sets the retry crate supports, each tested in isolation
const FEATURE_SETS: &[&[&str]] = &[
    &[],
    &["observability"],
    &["config"],
    &["test-utils"],
    &["observability", "config", "test-utils"],
];

/// Run the retry crate's tests once per supported feature set.
///
/// Every set starts from `--no-default-features` so gated integration tests
/// only run where their feature is enabled.
pub fn test_feature_matrix() -> Result<()> {
    let total = FEATURE_SETS.len();
    println!("Testing {PACKAGE} under {total} feature sets...");

    for (index, features) in FEATURE_SETS.iter().enumerate() {
        let joined = features.join(",");
        let label = if features.is_empty() { "none" } else { joined.as_str() };

        let mut args = vec!["test", "-p", PACKAGE, "--no-default-features"];
        if !features.is_empty() {
            args.extend(["--features", joined.as_str()]);
        }

        println!("\n[{}/{total}] cargo {}", index + 1, args.join(" "));
        cargo(&args, &format!("Tests failed with features '{label}'"))?;
        println!("✅ Features '{label}' passed");
    }

    println!("\n✅ All {total} feature sets passed!");
    Ok(())
}
