use is_terminal::IsTerminal;
use mtpl::{
    AlignmentDirection, CacheConfig, Destructuring, ScalarValue, TemplateCache, TemplateError,
    Token,
};
use serde_json::{Value as Json, json};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HELP: &str = "\
mtpl - Structured message template parser and renderer

USAGE:
    mtpl [OPTIONS] [TEMPLATE]

ARGS:
    <TEMPLATE>         Message template (default from MTPL_TEMPLATE env var)

OPTIONS:
    -p, --property <NAME=VALUE>  Property value used while rendering (repeatable)
    -t, --tokens                 Print the parsed tokens as JSON instead of rendering
    -c, --config <FILE>          Cache configuration file (TOML)
    -d, --debug                  Log cache activity to stderr
    -h, --help                   Print help
    -V, --version                Print version
";

struct Cli {
    template: Option<String>,
    properties: Vec<String>,
    tokens: bool,
    config: Option<PathBuf>,
    debug: bool,
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    use lexopt::prelude::*;

    let mut template = None;
    let mut properties = Vec::new();
    let mut tokens = false;
    let mut config = None;
    let mut debug = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                print!("{}", HELP);
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("mtpl {}", VERSION);
                std::process::exit(0);
            }
            Short('p') | Long("property") => {
                properties.push(parser.value()?.string()?);
            }
            Short('t') | Long("tokens") => {
                tokens = true;
            }
            Short('c') | Long("config") => {
                config = Some(PathBuf::from(parser.value()?));
            }
            Short('d') | Long("debug") => {
                debug = true;
            }
            Value(val) => {
                if template.is_none() {
                    template = Some(val.string()?);
                }
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        template,
        properties,
        tokens,
        config,
        debug,
    })
}

fn init_tracing(debug: bool) {
    let default = if debug { "mtpl=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli_config: Option<PathBuf>) -> mtpl::Result<CacheConfig> {
    if let Some(path) = cli_config {
        return CacheConfig::load(&path);
    }

    if let Some(path) = dirs::config_dir().map(|dir| dir.join("mtpl").join("config.toml"))
        && path.is_file()
    {
        debug!(path = %path.display(), "Loading cache configuration");
        return CacheConfig::load(&path);
    }

    Ok(CacheConfig::default())
}

fn parse_property(arg: &str) -> mtpl::Result<(String, ScalarValue)> {
    let Some((name, raw)) = arg.split_once('=') else {
        return Err(TemplateError::InvalidProperty {
            arg: arg.to_string(),
        });
    };
    if name.is_empty() {
        return Err(TemplateError::InvalidProperty {
            arg: arg.to_string(),
        });
    }

    let value = if let Ok(int) = raw.parse::<i64>() {
        ScalarValue::Int(int)
    } else if let Ok(float) = raw.parse::<f64>() {
        ScalarValue::Float(float)
    } else {
        match raw {
            "true" => ScalarValue::Bool(true),
            "false" => ScalarValue::Bool(false),
            "null" => ScalarValue::Null,
            _ => ScalarValue::Str(raw.to_string()),
        }
    };
    Ok((name.to_string(), value))
}

fn token_json(token: &Token) -> Json {
    match token {
        Token::Text(text) => json!({ "text": text.text() }),
        Token::Property(property) => {
            let destructuring = match property.destructuring() {
                Destructuring::Default => "default",
                Destructuring::Destructure => "destructure",
                Destructuring::Stringify => "stringify",
            };
            let alignment = property.alignment().map(|alignment| {
                let direction = match alignment.direction() {
                    AlignmentDirection::Left => "left",
                    AlignmentDirection::Right => "right",
                };
                json!({ "direction": direction, "width": alignment.width() })
            });
            json!({
                "property": property.property_name(),
                "raw": property.raw_text(),
                "format": property.format(),
                "alignment": alignment,
                "destructuring": destructuring,
                "position": property.try_get_positional_value(),
            })
        }
    }
}

fn run(cli: Cli) -> mtpl::Result<String> {
    let template = cli
        .template
        .or_else(|| env::var("MTPL_TEMPLATE").ok())
        .unwrap_or_default();

    let cache = TemplateCache::with_config(resolve_config(cli.config)?);
    let parsed = cache.get_or_parse(&template);

    if cli.tokens {
        let tokens = Json::Array(parsed.tokens().iter().map(token_json).collect());
        let text = if std::io::stdout().is_terminal() {
            serde_json::to_string_pretty(&tokens)
        } else {
            serde_json::to_string(&tokens)
        };
        return Ok(text? + "\n");
    }

    let properties = cli
        .properties
        .iter()
        .map(|arg| parse_property(arg))
        .collect::<mtpl::Result<HashMap<_, _>>>()?;

    let mut output = String::new();
    parsed.render(&properties, &mut output, None)?;
    output.push('\n');
    Ok(output)
}

fn main() -> ExitCode {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'mtpl --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.debug);

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
