//! Command-line launch options: difficulty, seed and map override.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rcb_core::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    /// `None` means the difficulty menu is shown.
    pub difficulty: Option<Difficulty>,
    pub seed: SeedChoice,
    pub map: Option<PathBuf>,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Parses `--difficulty`, `--seed` and `--map`, each as `--flag value` or `--flag=value`.
///
/// `args[0]` is the program name. Unknown arguments are ignored.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut difficulty = None;
    let mut seed = None;
    let mut map = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();
        let (flag, inline_value) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if !matches!(flag, "--difficulty" | "--seed" | "--map") {
            index += 1;
            continue;
        }

        let value = match inline_value {
            Some(value) => value,
            None => {
                let Some(value) = args.get(index + 1) else {
                    return Err(format!("missing value for {flag}"));
                };
                index += 1;
                value.as_str()
            }
        };
        index += 1;

        match flag {
            "--difficulty" => set_once(&mut difficulty, flag, value.parse::<Difficulty>()?)?,
            "--seed" => set_once(&mut seed, flag, parse_seed_value(value)?)?,
            _ => set_once(&mut map, flag, PathBuf::from(value))?,
        }
    }

    Ok(LaunchArgs {
        difficulty,
        seed: match seed {
            Some(seed) => SeedChoice::Cli(seed),
            None => SeedChoice::Generated(generated_seed),
        },
        map,
    })
}

fn set_once<T>(slot: &mut Option<T>, flag: &str, value: T) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn defaults_to_menu_and_generated_seed() {
        let args = as_args(&["lost-in-rcb"]);
        let launch = parse_launch_args(&args, 9_876_543).expect("empty args should parse");
        assert_eq!(launch.difficulty, None);
        assert_eq!(launch.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(launch.map, None);
    }

    #[test]
    fn parses_separate_and_inline_values() {
        let args =
            as_args(&["lost-in-rcb", "--difficulty", "hard", "--seed=2026", "--map", "m.txt"]);
        let launch = parse_launch_args(&args, 1).expect("valid flags should parse");
        assert_eq!(launch.difficulty, Some(Difficulty::Hard));
        assert_eq!(launch.seed, SeedChoice::Cli(2_026));
        assert_eq!(launch.map, Some(PathBuf::from("m.txt")));
    }

    #[test]
    fn difficulty_names_are_case_insensitive() {
        let args = as_args(&["lost-in-rcb", "--difficulty=MEDIUM"]);
        let launch = parse_launch_args(&args, 1).expect("valid difficulty should parse");
        assert_eq!(launch.difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn errors_when_flag_has_no_value() {
        let args = as_args(&["lost-in-rcb", "--seed"]);
        let err = parse_launch_args(&args, 1).expect_err("missing seed value should error");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_when_seed_value_is_not_a_number() {
        let args = as_args(&["lost-in-rcb", "--seed=abc"]);
        let err = parse_launch_args(&args, 1).expect_err("non-numeric seed value should error");
        assert!(err.contains("number"), "error should explain numeric requirement: {err}");
    }

    #[test]
    fn errors_on_unknown_difficulty() {
        let args = as_args(&["lost-in-rcb", "--difficulty", "nightmare"]);
        assert!(parse_launch_args(&args, 1).is_err());
    }

    #[test]
    fn errors_when_flag_is_repeated() {
        let args = as_args(&["lost-in-rcb", "--seed=1", "--seed", "2"]);
        let err = parse_launch_args(&args, 1).expect_err("duplicate seed flags should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate seed: {err}");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
