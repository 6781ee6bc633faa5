use std::collections::BTreeMap;

use anyhow::{Context, Result};

use grouping::{ExperimentRegistry, bucket_of, fnv1a_32};

/// Label printed when a lookup yields no group.
const UNASSIGNED: &str = "-";

/// Join rendered lines, each terminated by a newline.
fn render(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub(crate) fn run_assign(
    registry: &ExperimentRegistry,
    experiment: &str,
    ids: &[String],
) -> Result<String> {
    let mut lines = Vec::with_capacity(ids.len());
    for id in ids {
        let group = registry
            .assign(experiment, id)
            .with_context(|| format!("failed to assign `{id}`"))?;
        let name = group.map_or(UNASSIGNED, |g| g.name.as_str());
        lines.push(format!("{id}\t{name}"));
    }
    Ok(render(lines))
}

pub(crate) fn run_hash(seed: &str) -> String {
    let hash = fnv1a_32(seed);
    let bucket = match bucket_of(hash) {
        Ok(bucket) => bucket.to_string(),
        Err(error) => format!("{UNASSIGNED} ({error})"),
    };
    render(vec![format!("hash\t{hash}"), format!("bucket\t{bucket}")])
}

pub(crate) fn run_simulate(
    registry: &ExperimentRegistry,
    experiment: &str,
    samples: u32,
) -> Result<String> {
    let assigner = registry.get(experiment)?;
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for threshold in assigner.thresholds() {
        counts.entry(threshold.name()).or_default();
    }
    if let Some(default) = assigner.default_group() {
        counts.entry(default.name.as_str()).or_default();
    }

    for i in 0..samples {
        let id = format!("user-{i}");
        let name = registry
            .assign(experiment, &id)?
            .map_or(UNASSIGNED, |g| g.name.as_str());
        *counts.entry(name).or_default() += 1;
    }
    tracing::debug!(
        experiment,
        samples,
        groups = counts.len(),
        "simulation finished"
    );

    let lines = counts
        .into_iter()
        .map(|(name, count)| {
            let share = if samples == 0 {
                0.0
            } else {
                f64::from(count) * 100.0 / f64::from(samples)
            };
            format!("{name}\t{count}\t{share:.2}%")
        })
        .collect();
    Ok(render(lines))
}

pub(crate) fn run_list(registry: &ExperimentRegistry) -> String {
    let mut lines = Vec::new();
    for (name, assigner) in registry.iter() {
        lines.push(format!("{name} (total {})", assigner.total_weight()));
        for threshold in assigner.thresholds() {
            let (upper, group) = (threshold.upper(), threshold.name());
            lines.push(format!("  < {upper:>3}\t{group}"));
        }
        if let Some(default) = assigner.default_group() {
            lines.push(format!("  else\t{}", default.name));
        }
    }
    render(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grouping::GroupingSettings;

    const SAMPLE: &str = r"
experiments:
  welcome_content_test:
    groups:
      - { name: group-A, weight: 20 }
    default: group-default
";

    const EXPERIMENT: &str = "welcome_content_test";

    fn registry() -> ExperimentRegistry {
        let settings = GroupingSettings::from_yaml_str(SAMPLE).unwrap();
        ExperimentRegistry::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_assign_output() {
        let ids = vec!["user-001".to_string(), "user-002".to_string()];
        let out = run_assign(&registry(), EXPERIMENT, &ids).unwrap();
        assert_eq!(out, "user-001\tgroup-A\nuser-002\tgroup-default\n");
    }

    #[test]
    fn test_assign_unknown_experiment() {
        let ids = vec!["user-001".to_string()];
        assert!(run_assign(&registry(), "nope", &ids).is_err());
    }

    #[test]
    fn test_hash_output() {
        assert_eq!(run_hash("abcde"), "hash\t1956368136\nbucket\t36\n");
    }

    #[test]
    fn test_simulate_covers_every_group() {
        let out = run_simulate(&registry(), EXPERIMENT, 1_000).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("group-A\t"));
        assert!(lines[1].starts_with("group-default\t"));
    }

    #[test]
    fn test_simulate_zero_samples() {
        let out = run_simulate(&registry(), EXPERIMENT, 0).unwrap();
        assert_eq!(out, "group-A\t0\t0.00%\ngroup-default\t0\t0.00%\n");
    }

    #[test]
    fn test_list_output() {
        let out = run_list(&registry());
        assert_eq!(
            out,
            "welcome_content_test (total 20)\n  <  20\tgroup-A\n  else\tgroup-default\n"
        );
    }
}
