//! Interactive chat application for conversing with OpenAI models.
//!
//! This binary provides a streaming REPL interface: user input is sent as
//! conversation context, the response streams to the terminal as it
//! arrives, and once complete the raw text is erased and re-rendered as
//! formatted Markdown. Every session appends to a transcript log.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! ovidius-chat
//!
//! # Specify a model
//! ovidius-chat --model gpt-4.1-mini
//!
//! # Set a system prompt
//! ovidius-chat --system "You are a helpful coding assistant"
//!
//! # Disable colors (useful for piping output)
//! ovidius-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/thanks` - Exit the chat
//! - `/model [name]` - Show or change the model
//! - `/import <file...>` - Inject local files as context
//! - `/usage` - Open the API usage page

use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use ovidius::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, Transcript,
    USAGE_URL, help_text, model_overview, parse_command,
};
use ovidius::repaint::{AnsiRepaint, NoopRepaint, Repaint};
use ovidius::wrap::TerminalWidth;
use ovidius::{Model, OpenAi};

/// Main entry point for the ovidius-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("ovidius-chat [OPTIONS]");
    let config = match ChatConfig::try_from(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(2);
        }
    };
    let use_color = config.use_color;
    let mut renderer = PlainTextRenderer::with_color(use_color);

    let client = match OpenAi::new(None) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!(" - export OPENAI_API_KEY=\"your_api_key\"");
            std::process::exit(1);
        }
    };

    let transcript = match Transcript::create(&config.log_dir, &config.model) {
        Ok(transcript) => transcript,
        Err(err) => {
            renderer.print_error(&format!("transcript disabled: {err}"));
            Transcript::disabled()
        }
    };

    let mut session = ChatSession::new(client, config, transcript);
    let mut repaint: Box<dyn Repaint> = if std::io::stdout().is_terminal() {
        Box::new(AnsiRepaint::stdout())
    } else {
        Box::new(NoopRepaint)
    };
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupt handling during streaming
    let interrupted = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!();
    for line in help_text().lines() {
        println!("{line}");
    }
    println!("\n{}: How can I help you today?\n", session.model());

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Err(err) = session.record_user_input(line) {
                    renderer.print_error(&err.to_string());
                }

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Thanks => {
                            farewell(&session.model());
                            break;
                        }
                        ChatCommand::Model(None) => {
                            renderer.print_info(&model_overview(&session.model()));
                        }
                        ChatCommand::Model(Some(name)) => match name.parse::<Model>() {
                            Ok(model) => {
                                session.set_model(model);
                                renderer.print_success(&format!("Switched model to: {model}"));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Usage => match webbrowser::open(USAGE_URL) {
                            Ok(_) => renderer.print_info(&format!("Opened {USAGE_URL}")),
                            Err(err) => {
                                renderer.print_error(&format!("could not open browser: {err}"))
                            }
                        },
                        ChatCommand::Import(paths) => {
                            for path in paths {
                                match session.import_file(&path) {
                                    Ok(imported) => renderer.print_success(&format!(
                                        "Imported: {}",
                                        imported.display()
                                    )),
                                    Err(err) => renderer.print_error(&err.to_string()),
                                }
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                            renderer.print_info("Available: /thanks, /model, /usage, /import");
                        }
                    }
                    continue;
                }

                // Regular message - stream a response
                let width = TerminalWidth::detect();
                if let Err(err) = session
                    .send_streaming(line, &mut renderer, repaint.as_mut(), width, &interrupted)
                    .await
                {
                    // The interrupt diagnostic is already on screen; every
                    // other failure is reported here and the loop continues.
                    if !err.is_interrupted() {
                        renderer.print_error(&err.to_string());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                farewell(&session.model());
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {err}"));
                break;
            }
        }
    }

    if let Err(err) = session.finish() {
        renderer.print_error(&err.to_string());
    }

    Ok(())
}

fn farewell(model: &Model) {
    println!(
        "\n{model}: You're welcome! If you need me again, just type \"ovidius-chat\" into your terminal."
    );
}
