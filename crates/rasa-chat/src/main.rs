//! Terminal front-end for a Rasa bot.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rasa_chat::command::HELP;
use rasa_chat::core::conversation::{Message, Sender};
use rasa_chat::core::monitor::ConnectionMonitor;
use rasa_chat::core::view::{ChatView, Indicator};
use rasa_chat::core::{ChatBuilder, ReplyClient};
use rasa_chat::input::read_line;
use rasa_chat::markup::parse_bold;
use rasa_chat::{Command, Settings};
use rasa_chat_rest::RasaProvider;
use tokio::io::{self, BufReader};
use tokio::select;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};

const BAR_CHAR: &str = "▎";
const CLEAR_LINE: &str = "\r\x1b[2K";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    debug!("settings: {settings:?}");

    let client = ReplyClient::new(RasaProvider::new(settings.rasa.clone()));
    let monitor =
        ConnectionMonitor::spawn(client.clone(), ConnectionMonitor::DEFAULT_INTERVAL);

    let mut builder = ChatBuilder::with_reply_client(client.clone())
        .with_sender_id(settings.rasa.sender_id());
    if let Some(delay) = settings.char_delay {
        builder = builder.with_char_delay(delay);
    }
    if let Some(delay) = settings.message_delay {
        builder = builder.with_message_delay(delay);
    }
    let chat = builder.build();
    let mut view_rx = chat.subscribe();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut renderer = Renderer {
        bot_name: settings.bot_name.clone(),
        progress_style,
        progress_bar: None,
        printed: 0,
        typing_shown: false,
    };

    println!(
        "Chatting with {} at {}. Type {} for commands.",
        settings.bot_name.bold(),
        settings.rasa.base_url(),
        "/help".bright_white()
    );

    let mut stdin = BufReader::new(io::stdin());
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => {
                for (usage, description) in HELP {
                    println!("  {:<10} {description}", usage.bright_white());
                }
            }
            Command::Clear => {
                chat.clear();
                let cleared = timeout(
                    Duration::from_secs(1),
                    view_rx.wait_for(|view| view.messages().is_empty()),
                )
                .await;
                if !matches!(cleared, Ok(Ok(_))) {
                    warn!("chat did not clear in time");
                }
                renderer.reset();
                println!("{}", "Conversation cleared.".dimmed());
            }
            Command::Status => {
                let status = monitor.status();
                if monitor.is_checking() {
                    println!("Server is {status} (checking...)");
                } else {
                    println!("Server is {status}");
                }
            }
            Command::Domain => {
                renderer.start_spinner("Fetching domain...");
                let result = client.fetch_domain().await;
                renderer.stop_spinner();
                match result {
                    Ok(domain) => {
                        print_list("Intents", &domain.intent_names());
                        print_list("Entities", &domain.entity_names());
                        let actions: Vec<&str> =
                            domain.actions.iter().map(String::as_str).collect();
                        print_list("Actions", &actions);
                    }
                    Err(err) => {
                        println!("{}", format!("Failed to fetch domain: {err}").red());
                    }
                }
            }
            Command::Button(n) => {
                let view = chat.view();
                let button = view
                    .messages()
                    .iter()
                    .rev()
                    .find(|msg| msg.sender() == Sender::Bot && !msg.buttons().is_empty())
                    .and_then(|msg| msg.buttons().get(n - 1))
                    .cloned();
                let Some(button) = button else {
                    println!("{}", format!("There is no button {n}.").red());
                    continue;
                };
                let committed = view.messages().len();
                chat.press(&button);
                if !wait_for_bot(&mut view_rx, &mut renderer, committed).await {
                    break;
                }
            }
            Command::Say(text) => {
                let committed = chat.view().messages().len();
                chat.send(text);
                if !wait_for_bot(&mut view_rx, &mut renderer, committed).await {
                    break;
                }
            }
        }
    }

    renderer.stop_spinner();
    chat.shutdown();
    monitor.stop();
}

/// Renders snapshots until the bot has nothing left to say.
///
/// Returns `false` if the chat went away.
async fn wait_for_bot(
    view_rx: &mut watch::Receiver<ChatView>,
    renderer: &mut Renderer,
    committed: usize,
) -> bool {
    loop {
        let view = view_rx.borrow_and_update().clone();
        renderer.render(&view);

        // The user message has to land before the chat can be idle again.
        if view.messages().len() > committed
            && !view.is_loading()
            && !view.is_bot_typing()
        {
            renderer.stop_spinner();
            return true;
        }

        select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    renderer.stop_spinner();
                    return false;
                }
            },
            _ = sleep(Duration::from_millis(100)) => {}
        }
    }
}

struct Renderer {
    bot_name: String,
    progress_style: ProgressStyle,
    progress_bar: Option<ProgressBar>,
    printed: usize,
    typing_shown: bool,
}

impl Renderer {
    fn reset(&mut self) {
        self.clear_typing();
        self.printed = 0;
    }

    fn render(&mut self, view: &ChatView) {
        let messages = view.messages();
        if messages.len() < self.printed {
            self.printed = 0;
        }
        for msg in &messages[self.printed..] {
            // User messages are already on screen as typed input.
            if msg.sender() == Sender::Bot {
                self.stop_spinner();
                self.clear_typing();
                self.print_message(msg);
            }
        }
        self.printed = messages.len();

        match view.indicator() {
            Indicator::Text(text) => {
                self.stop_spinner();
                print!(
                    "{CLEAR_LINE}{}🤖 {}: {}",
                    BAR_CHAR.bright_cyan(),
                    self.bot_name.bold(),
                    text.bright_white()
                );
                std::io::stdout().flush().ok();
                self.typing_shown = true;
            }
            Indicator::Dots => {
                self.stop_spinner();
                print!(
                    "{CLEAR_LINE}{}🤖 {} {}",
                    BAR_CHAR.bright_cyan(),
                    self.bot_name.bold(),
                    "is typing...".dimmed()
                );
                std::io::stdout().flush().ok();
                self.typing_shown = true;
            }
            Indicator::Hidden => {
                self.clear_typing();
                if view.is_loading() {
                    self.start_spinner("Waiting for the bot...");
                }
            }
        }
    }

    fn print_message(&self, msg: &Message) {
        let bar = BAR_CHAR.bright_cyan();
        if msg.is_error() {
            println!(
                "{}🤖 {}: {}",
                BAR_CHAR.red(),
                self.bot_name.bold(),
                msg.text().red()
            );
            return;
        }

        print!("{bar}🤖 {}: ", self.bot_name.bold());
        for span in parse_bold(msg.text()) {
            if span.bold {
                print!("{}", span.text.bright_white().bold());
            } else {
                print!("{}", span.text.bright_white());
            }
        }
        println!();

        if let Some(image) = msg.image() {
            println!("{bar}   🖼  {}", image.underline());
        }
        for (i, button) in msg.buttons().iter().enumerate() {
            println!(
                "{bar}   {} {}",
                format!("[/{}]", i + 1).bright_yellow(),
                button.title
            );
        }
    }

    fn clear_typing(&mut self) {
        if self.typing_shown {
            print!("{CLEAR_LINE}");
            std::io::stdout().flush().ok();
            self.typing_shown = false;
        }
    }

    fn start_spinner(&mut self, message: &'static str) {
        self.progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(self.progress_style.clone());
                progress_bar.set_message(message);
                progress_bar
            })
            .inc(1);
    }

    fn stop_spinner(&mut self) {
        if let Some(progress_bar) = self.progress_bar.take() {
            progress_bar.finish_and_clear();
        }
    }
}

fn print_list(label: &str, items: &[&str]) {
    if items.is_empty() {
        println!("{}: {}", label.bold(), "(none)".dimmed());
    } else {
        println!("{}: {}", label.bold(), items.join(", "));
    }
}
