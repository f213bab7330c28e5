mod args;

use std::io::{self, Read};
use std::{env, fs, process};

use anyhow::{Context, Result, bail};
use bbmark_config::Config;
use bbmark_render::{HtmlRenderer, PlainRenderer, Render};
use bbmark_syntax::{ResolvedNode, parse_document};

use args::{Output, USAGE, parse_args};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config_path = Config::config_path();
    let config = Config::load()
        .with_context(|| format!("loading config from {}", config_path.display()))?
        .unwrap_or_default();
    log::debug!("using config {config:?}");

    let input = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    if let Some(limit) = config.max_input_bytes
        && input.len() > limit
    {
        bail!(
            "input is {} bytes, more than the configured limit of {limit}",
            input.len()
        );
    }

    let mut parse_options = config.parse_options();
    if let Some(autolink) = args.autolink {
        parse_options.autolink = autolink;
    }
    let mut render_options = config.render_options();
    render_options.disabled.extend(args.disabled.iter().copied());

    let doc = parse_document(&input, &parse_options);

    match args.output {
        Output::Tree => print!("{}", format_tree(&doc.nodes, 0)),
        Output::Html => println!("{}", HtmlRenderer::new(render_options).render(&doc)),
        Output::Text => println!("{}", PlainRenderer::new(render_options).render(&doc)),
    }

    Ok(())
}

/// One line per node: `Kind@start..end`, then the argument and text if any.
fn format_tree(nodes: &[ResolvedNode], indent: usize) -> String {
    let mut result = String::new();
    let prefix = "  ".repeat(indent);

    for node in nodes {
        result.push_str(&format!(
            "{}{:?}@{}..{}",
            prefix, node.kind, node.span.start, node.span.end
        ));
        if let Some(argument) = &node.argument {
            result.push_str(&format!(" ={argument:?}"));
        }
        if let Some(text) = &node.text {
            result.push_str(&format!(" {text:?}"));
        }
        result.push('\n');
        result.push_str(&format_tree(&node.children, indent + 1));
    }

    result
}
