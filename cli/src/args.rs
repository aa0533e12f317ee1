//! Parsing command-line arguments and configuration files.

use clap::{
    command, error::ErrorKind, parser::ValueSource, value_parser, Arg, ArgAction, Command,
    error::Result as ClapResult,
};
use lifecache_lib::{Cell, Config, Generation, Rule};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use std::{fs, path::Path};

/// A random soup to seed a plane with.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct SoupSpec {
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(default = "default_density")]
    pub(crate) density: f64,
    pub(crate) seed: Option<u64>,
}

fn default_density() -> f64 {
    0.5
}

/// A plane as described in a configuration file.
///
/// Exactly one of `pattern` and `soup` must be given.
/// A `pattern` is either the name of a built-in pattern,
/// or a pattern in Plaintext format.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PlaneSpec {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) index: u64,
    pub(crate) pattern: Option<String>,
    pub(crate) soup: Option<SoupSpec>,
}

/// The contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    repository: Config,
    planes: Vec<PlaneSpec>,
}

/// A plane ready to be seeded.
pub(crate) struct Plane {
    pub(crate) name: String,
    pub(crate) index: u64,
    pub(crate) seed: Generation,
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) planes: Vec<Plane>,
    pub(crate) generations: u64,
    pub(crate) step: usize,
    pub(crate) print: bool,
    pub(crate) verbose: u8,
}

/// Built-in patterns, all with their top-left cell at the origin.
fn named_pattern(name: &str) -> Option<Generation> {
    match name {
        "block" => Some(Generation::block_at(0, 0)),
        "blinker" => Some(Generation::horizontal_bar_at(1, 0)),
        "glider" => Some(Generation::with_alive_cells([
            (1, 0),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ])),
        _ => None,
    }
}

fn soup(spec: &SoupSpec, offset: u64) -> Result<Generation, String> {
    let mut rng = match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
        None => StdRng::from_entropy(),
    };
    Generation::soup(&mut rng, spec.width, spec.height, spec.density).map_err(|e| e.to_string())
}

/// Parses `WxH`.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| String::from("size must look like WIDTHxHEIGHT"))?;
    let w = w.trim().parse().map_err(|e| format!("invalid width: {}", e))?;
    let h = h.trim().parse().map_err(|e| format!("invalid height: {}", e))?;
    Ok((w, h))
}

impl PlaneSpec {
    fn seed(&self) -> Result<Generation, String> {
        match (&self.pattern, &self.soup) {
            (Some(pattern), None) => match named_pattern(pattern) {
                Some(gen) => Ok(gen),
                None => Generation::from_plaintext(pattern, Cell::new(0, 0))
                    .map_err(|e| e.to_string()),
            },
            (None, Some(spec)) => soup(spec, 0),
            _ => Err(format!(
                "plane {:?} needs exactly one of `pattern` and `soup`",
                self.name
            )),
        }
    }
}

/// The stride between queried indices, as an iterator step.
fn step_size(step: u64) -> Result<usize, String> {
    usize::try_from(step).map_err(|_| format!("step {} is too large for this platform", step))
}

fn read_config_file(path: &Path) -> Result<FileConfig, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&text).map_err(|e| e.to_string()),
        Some("yaml" | "yml") => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str(&text).map_err(|e| e.to_string()),
        _ => Err(String::from(
            "configuration file must end with .toml, .yaml, .yml or .json",
        )),
    }
}

fn build_command() -> Command {
    command!()
        .long_about(
            "Computes generations of Conway's Game of Life on named planes, \n\
             caching every generation it computes.\n\
             \n\
             Each plane is seeded at some index and then queried at increasing \n\
             indices, on its own thread. A query is a hit if the generation is \n\
             cached, a partial hit if it was evolved from an earlier cached \n\
             generation, and a miss otherwise.\n\
             \n\
             Generations are displayed in Plaintext format.\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o`.\n",
        )
        .arg(
            Arg::new("CONFIG")
                .help("Configuration file (TOML, YAML or JSON)")
                .long_help(
                    "Configuration file (TOML, YAML or JSON)\n\
                     It may contain a `repository` table with `rule_string` and \
                     `cache_intermediate`, and a list of `planes`, each with a `name`, \
                     an optional starting `index`, and either a `pattern` or a `soup`.\n\
                     If it lists planes, --pattern, --soup and --planes are ignored.\n",
                )
                .short('C')
                .long("config")
                .value_parser(value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Initial pattern")
                .long_help(
                    "Initial pattern\n\
                     Either one of the built-in patterns `block`, `blinker`, `glider`, \
                     or the path to a file in Plaintext format.\n",
                )
                .short('p')
                .long("pattern")
                .default_value("glider")
                .conflicts_with("SOUP"),
        )
        .arg(
            Arg::new("SOUP")
                .help("Starts from a random soup of the given size, e.g. 16x16")
                .long("soup")
                .value_parser(parse_size),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Density of the random soup")
                .long("density")
                .default_value("0.5")
                .value_parser(value_parser!(f64))
                .requires("SOUP"),
        )
        .arg(
            Arg::new("SEED")
                .help("Random seed of the soup")
                .long("seed")
                .value_parser(value_parser!(u64))
                .requires("SOUP"),
        )
        .arg(
            Arg::new("PLANES")
                .help("Number of planes, named plane-0, plane-1, ...")
                .short('n')
                .long("planes")
                .default_value("1")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to compute on each plane")
                .short('g')
                .long("generations")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("STEP")
                .help("Queries every STEP-th generation")
                .short('s')
                .long("step")
                .default_value("1")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports totalistic Life-like rules without B0.\n",
                )
                .short('r')
                .long("rule")
                .default_value("B3/S23")
                .value_parser(|d: &str| {
                    d.parse::<Rule>()
                        .map(|_| d.to_string())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("CACHE")
                .help("Caches every intermediate generation, not only the queried ones")
                .long("cache-intermediate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("PRINT")
                .help("Prints every queried generation")
                .long("print")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("More logging; repeat for even more")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        let mut app = build_command();
        let matches = app.try_get_matches_from_mut(std::env::args_os())?;
        let file = match matches.get_one::<std::path::PathBuf>("CONFIG") {
            Some(path) => read_config_file(path).map_err(|e| {
                app.error(ErrorKind::Io, format!("{}: {}", path.display(), e))
            })?,
            None => FileConfig::default(),
        };

        let mut config = file.repository;
        if matches.value_source("RULE") == Some(ValueSource::CommandLine) {
            let rule_string = matches.get_one::<String>("RULE").cloned().unwrap_or_default();
            config = config.set_rule_string(rule_string);
        }
        if matches.get_flag("CACHE") {
            config = config.set_cache_intermediate(true);
        }

        let planes = if file.planes.is_empty() {
            let count = matches.get_one::<u64>("PLANES").copied().unwrap_or(1);
            let soup_size = matches.get_one::<(u32, u32)>("SOUP").copied();
            let pattern = match soup_size {
                Some(_) => None,
                None => {
                    let name = matches
                        .get_one::<String>("PATTERN")
                        .map(String::as_str)
                        .unwrap_or("glider");
                    let gen = match named_pattern(name) {
                        Some(gen) => gen,
                        None => {
                            let text = fs::read_to_string(name).map_err(|e| {
                                app.error(ErrorKind::Io, format!("{}: {}", name, e))
                            })?;
                            Generation::from_plaintext(&text, Cell::new(0, 0)).map_err(|e| {
                                app.error(ErrorKind::InvalidValue, e.to_string())
                            })?
                        }
                    };
                    Some(gen)
                }
            };
            let mut planes = Vec::new();
            for i in 0..count {
                let seed = match (&pattern, soup_size) {
                    (Some(gen), _) => gen.clone(),
                    (None, Some((width, height))) => {
                        let spec = SoupSpec {
                            width,
                            height,
                            density: matches.get_one::<f64>("DENSITY").copied().unwrap_or(0.5),
                            seed: matches.get_one::<u64>("SEED").copied(),
                        };
                        soup(&spec, i)
                            .map_err(|e| app.error(ErrorKind::InvalidValue, e))?
                    }
                    (None, None) => Generation::empty(),
                };
                planes.push(Plane {
                    name: format!("plane-{}", i),
                    index: 0,
                    seed,
                });
            }
            planes
        } else {
            let mut planes = Vec::with_capacity(file.planes.len());
            for spec in &file.planes {
                let seed = spec
                    .seed()
                    .map_err(|e| app.error(ErrorKind::InvalidValue, e))?;
                planes.push(Plane {
                    name: spec.name.clone(),
                    index: spec.index,
                    seed,
                });
            }
            planes
        };

        let step = step_size(matches.get_one::<u64>("STEP").copied().unwrap_or(1))
            .map_err(|e| app.error(ErrorKind::ValueValidation, e))?;

        Ok(Args {
            config,
            planes,
            generations: matches.get_one::<u64>("GENERATIONS").copied().unwrap_or(100),
            step,
            print: matches.get_flag("PRINT"),
            verbose: matches.get_count("VERBOSE"),
        })
    }
}
