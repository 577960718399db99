use std::path::PathBuf;

pub const DEFAULT_SCRIPT: &str = "main.lua";

pub const USAGE: &str = "Usage: luadraw [OPTIONS] [script]

Opens a window configured by a Lua script and redraws it on a fixed timer
until the window is closed.

Arguments:
  script         Lua script to run at startup (default: ./main.lua).

Options:
  -h, --help     Show this help message and exit.

Script globals:
  window_name    Window title (string). Default \"Drawing with Lua!\".
  bgcolor        Background color, a table with red, green and blue fields
                 in [0, 1]. Default { red = 1, green = 0, blue = 1 }.

Examples:
  luadraw
      Run ./main.lua.

  luadraw scenes/night.lua
      Run the given script instead.

Logging is controlled with RUST_LOG, e.g. RUST_LOG=debug luadraw";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run { script: PathBuf },
    Help,
}

/// Parses the arguments that follow the program name.
pub fn parse(args: &[String]) -> Result<Command, String> {
    let mut script = None;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(format!("Unknown option {s}"));
            }
            s => {
                if script.is_some() {
                    return Err(format!("Unexpected argument {s}"));
                }
                script = Some(PathBuf::from(s));
            }
        }
    }

    Ok(Command::Run {
        script: script.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_main_lua() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                script: PathBuf::from("main.lua")
            }
        );
    }

    #[test]
    fn takes_script_path() {
        assert_eq!(
            parse(&args(&["scenes/night.lua"])).unwrap(),
            Command::Run {
                script: PathBuf::from("scenes/night.lua")
            }
        );
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&args(&["x.lua", "--help"])).unwrap(), Command::Help);
        assert_eq!(parse(&args(&["-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn rejects_unknown_options_and_extra_arguments() {
        assert!(parse(&args(&["--fullscreen"])).is_err());
        assert!(parse(&args(&["a.lua", "b.lua"])).is_err());
    }
}
