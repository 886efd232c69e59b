//! xtask - Build tasks for manven
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use manven::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for manven")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            let gen_all = !man && !markdown;

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate man pages using clap_mangen, one per (nested) subcommand
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&cmd, &man_dir.join("manven.1"))?;

    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        render_man(subcommand, &man_dir.join(format!("manven-{name}.1")))?;

        for nested in visible(subcommand) {
            let file = format!("manven-{}-{}.1", name, nested.get_name());
            render_man(nested, &man_dir.join(file))?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn render_man(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    markdown.push_str("# manven Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");
    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("- [{name}](#manven-{name})\n"));
    }
    markdown.push_str("\n---\n\n");

    markdown.push_str("## manven\n\n");
    push_about(&mut markdown, &cmd);
    push_long_about(&mut markdown, &cmd);

    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("## manven {name}\n\n"));
        push_about(&mut markdown, subcommand);
        push_arguments(&mut markdown, subcommand, true);

        if subcommand.get_long_about().is_some() {
            markdown.push_str("### Description\n\n");
            push_long_about(&mut markdown, subcommand);
        }

        let nested: Vec<_> = visible(subcommand).collect();
        if !nested.is_empty() {
            markdown.push_str("### Subcommands\n\n");
            for nested_cmd in nested {
                markdown.push_str(&format!("#### manven {} {}\n\n", name, nested_cmd.get_name()));
                push_about(&mut markdown, nested_cmd);
                push_arguments(&mut markdown, nested_cmd, false);
                push_long_about(&mut markdown, nested_cmd);
            }
        }

        markdown.push_str("---\n\n");
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}

fn visible(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

fn push_about(markdown: &mut String, cmd: &Command) {
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{about}\n\n"));
    }
}

fn push_long_about(markdown: &mut String, cmd: &Command) {
    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str(&format!("```\n{long_about}\n```\n\n"));
    }
}

/// List positional arguments and options, skipping help/version.
fn push_arguments(markdown: &mut String, cmd: &Command, headings: bool) {
    let args: Vec<&Arg> = cmd
        .get_arguments()
        .filter(|a| {
            let id = a.get_id().as_str();
            id != "help" && id != "version"
        })
        .collect();
    let (positional, options): (Vec<&Arg>, Vec<&Arg>) =
        args.into_iter().partition(|a| a.is_positional());

    if !positional.is_empty() {
        if headings {
            markdown.push_str("### Arguments\n\n");
        }
        for arg in positional {
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            markdown.push_str(&format!(
                "- `<{}>`: {}\n",
                arg.get_id().as_str().to_uppercase(),
                help
            ));
        }
        markdown.push('\n');
    }

    let flags: Vec<(String, &Arg)> = options
        .into_iter()
        .filter_map(|arg| {
            let long = arg.get_long().map(|l| format!("--{l}"));
            let short = arg.get_short().map(|s| format!("-{s}"));
            let flag = match (long, short) {
                (Some(l), Some(s)) => format!("{s}, {l}"),
                (Some(l), None) => l,
                (None, Some(s)) => s,
                _ => return None,
            };
            Some((flag, arg))
        })
        .collect();

    if !flags.is_empty() {
        if headings {
            markdown.push_str("### Options\n\n");
        }
        for (flag, arg) in flags {
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            markdown.push_str(&format!("- `{flag}`: {help}\n"));
        }
        markdown.push('\n');
    }
}
