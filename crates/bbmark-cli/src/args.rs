use std::path::PathBuf;

use bbmark_syntax::MarkupKind;

pub const USAGE: &str = "Usage: bbmark [--tree|--html|--text] [--no-autolink] [--disable <tag>]... [FILE]

Parses a bbcode message from FILE, or stdin when FILE is omitted.

  --tree           print the parsed node tree (default)
  --html           render an HTML fragment
  --text           render with markup stripped
  --no-autolink    leave bare URLs alone
  --disable <tag>  show <tag> as literal text, e.g. --disable color
  -h, --help       show this message";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Tree,
    Html,
    Text,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub output: Output,
    /// `Some(false)` when `--no-autolink` was given; the config decides otherwise.
    pub autolink: Option<bool>,
    pub disabled: Vec<MarkupKind>,
    pub input: Option<PathBuf>,
    pub help: bool,
}

/// Parses everything after the program name.
pub fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--tree" => parsed.output = Output::Tree,
            "--html" => parsed.output = Output::Html,
            "--text" => parsed.output = Output::Text,
            "--no-autolink" => parsed.autolink = Some(false),
            "--disable" => {
                let tag = args
                    .next()
                    .ok_or_else(|| "--disable expects a tag keyword".to_string())?;
                let kind = tag.parse::<MarkupKind>().map_err(|err| err.to_string())?;
                parsed.disabled.push(kind);
            }
            "-" => set_input(&mut parsed, arg)?,
            other if other.starts_with('-') => return Err(format!("unknown option: {other}")),
            _ => set_input(&mut parsed, arg)?,
        }
    }

    Ok(parsed)
}

fn set_input(parsed: &mut Args, arg: String) -> Result<(), String> {
    if parsed.input.is_some() {
        return Err("only one input file may be given".to_string());
    }
    // "-" means stdin, same as leaving it out
    if arg != "-" {
        parsed.input = Some(PathBuf::from(arg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_to_tree_from_stdin() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn reads_flags_and_file() {
        let parsed = args(&["--html", "--no-autolink", "--disable", "color", "msg.txt"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                output: Output::Html,
                autolink: Some(false),
                disabled: vec![MarkupKind::Color],
                input: Some(PathBuf::from("msg.txt")),
                help: false,
            }
        );
    }

    #[test]
    fn last_output_flag_wins() {
        assert_eq!(args(&["--html", "--text"]).unwrap().output, Output::Text);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            args(&["--disable", "blink"]).unwrap_err(),
            "unknown tag keyword 'blink'"
        );
        assert_eq!(
            args(&["--disable"]).unwrap_err(),
            "--disable expects a tag keyword"
        );
        assert_eq!(args(&["--xml"]).unwrap_err(), "unknown option: --xml");
        assert_eq!(
            args(&["a.txt", "b.txt"]).unwrap_err(),
            "only one input file may be given"
        );
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(args(&["-"]).unwrap().input, None);
    }
}
