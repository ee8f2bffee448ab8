//! Interactive chat: the login page, then the chat page.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Context as _;
use colored::Colorize;
use packchat_chat::{
    Attachment, ChatController, LoginOutcome, PackSelection, Page, Session, TurnOutcome,
};
use packchat_core::{Credentials, Pack, Role, Turn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::command::{COMMANDS, ReplCommand};

/// Tracing target for the interactive front-end.
const TRACING_TARGET: &str = "packchat_cli::repl";

/// Line editor helper: command completion and hints, and masking while a
/// password is typed.
#[derive(Default)]
struct ChatHelper {
    masked: bool,
}

impl ChatHelper {
    fn command_prefix<'l>(&self, line: &'l str, pos: usize) -> Option<&'l str> {
        let line = &line[..pos];
        (!self.masked && line.starts_with('/') && !line.contains(' ')).then_some(line)
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(prefix) = self.command_prefix(line, pos) else {
            return Ok((0, Vec::new()));
        };

        let candidates = COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, _)| Pair {
                display: (*name).to_owned(),
                replacement: (*name).to_owned(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masked {
            Owned("*".repeat(line.chars().count()))
        } else if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let prefix = self.command_prefix(line, pos)?;
        COMMANDS
            .iter()
            .find(|(name, _)| name.starts_with(prefix) && name.len() > prefix.len())
            .map(|(name, _)| name[prefix.len()..].to_owned())
    }
}

impl Validator for ChatHelper {}

type ChatEditor = Editor<ChatHelper, DefaultHistory>;

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive session until the user quits.
pub async fn run(controller: ChatController) -> anyhow::Result<()> {
    let mut editor = ChatEditor::new().context("failed to initialize line editor")?;
    editor.set_helper(Some(ChatHelper::default()));

    println!("{}", "=== packchat ===".bright_magenta().bold());
    println!();

    let mut session = Session::new();
    let mut chat = ChatPage::default();

    loop {
        let flow = match session.page() {
            Page::Login => login_page(&mut editor, &controller, &mut session).await?,
            Page::Chat => chat.step(&mut editor, &controller, &mut session).await?,
        };

        if let Flow::Quit = flow {
            println!("{}", "Goodbye!".bright_green());
            return Ok(());
        }
    }
}

/// Reads one line. `None` means the user wants to leave.
fn read_line(editor: &mut ChatEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) => {
            println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            Ok(Some(String::new()))
        }
        Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err).context("failed to read input"),
    }
}

/// Reads one line with the typed characters masked.
fn read_secret(editor: &mut ChatEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    set_masked(editor, true);
    let line = read_line(editor, prompt);
    set_masked(editor, false);
    line
}

fn set_masked(editor: &mut ChatEditor, masked: bool) {
    if let Some(helper) = editor.helper_mut() {
        helper.masked = masked;
    }
}

async fn login_page(
    editor: &mut ChatEditor,
    controller: &ChatController,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    println!("{}", "Login".bold());

    let Some(email) = read_line(editor, "Enter your email: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(password) = read_secret(editor, "Enter your password: ")? else {
        return Ok(Flow::Quit);
    };

    let credentials = Credentials::new(email.trim(), password);
    match controller.login(session, &credentials).await {
        LoginOutcome::LoggedIn => {
            println!("{}", "Logged in successfully!".green());
            println!();
            println!("{}", "Chatbot with Pack Data Access".bold());

            let packs = controller.refresh_packs(session).await;
            print_packs(packs, &PackSelection::None);
            println!("{}", "Type /help for commands.".bright_black());
        }
        LoginOutcome::Failed => {
            println!(
                "{}",
                "Failed to authenticate. Please check your credentials.".red()
            );
        }
    }

    Ok(Flow::Continue)
}

/// Chat page state that lives outside the session: the pack picker and the
/// attached files.
#[derive(Default)]
struct ChatPage {
    selection: PackSelection,
    attachments: Vec<Attachment>,
}

impl ChatPage {
    fn prompt(&self) -> String {
        match self.attachments.len() {
            0 => format!("[{}] > ", self.selection),
            n => format!("[{} +{n}] > ", self.selection),
        }
    }

    async fn step(
        &mut self,
        editor: &mut ChatEditor,
        controller: &ChatController,
        session: &mut Session,
    ) -> anyhow::Result<Flow> {
        let Some(line) = read_line(editor, &self.prompt())? else {
            return Ok(Flow::Quit);
        };

        let command = ReplCommand::parse(&line);
        if command != ReplCommand::Empty {
            let _ = editor.add_history_entry(line.as_str());
        }

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Help => print_help(),
            ReplCommand::Packs => {
                let packs = controller.refresh_packs(session).await;
                print_packs(packs, &self.selection);
            }
            ReplCommand::Pack(selection) => self.select(selection, session),
            ReplCommand::Attach { path, mime } => {
                match Attachment::from_path(&path, mime).await {
                    Ok(attachment) => {
                        println!(
                            "{}",
                            format!("Attached {} ({})", attachment.name, attachment.kind())
                                .green()
                        );
                        self.attachments.push(attachment);
                    }
                    Err(error) => eprintln!("{}", error.to_chain_string().red()),
                }
            }
            ReplCommand::Detach => {
                let removed = self.attachments.len();
                self.attachments.clear();
                println!("Removed {removed} attachment(s).");
            }
            ReplCommand::History => print_history(session),
            ReplCommand::Suggest(seed) => {
                let suggestions = controller.suggest(seed.as_deref()).await;
                if suggestions.is_empty() {
                    println!("{}", "No suggestions available.".yellow());
                }
                for (index, suggestion) in suggestions.iter().enumerate() {
                    println!("{}. {suggestion}", index + 1);
                }
            }
            ReplCommand::Message(text) => self.ask(controller, session, &text).await,
            ReplCommand::Invalid(message) => println!("{}", message.yellow()),
        }

        Ok(Flow::Continue)
    }

    fn select(&mut self, selection: PackSelection, session: &Session) {
        match selection.resolve(session.packs()) {
            Ok(_) => {
                self.selection = selection;
                println!("Selected pack: {}", self.selection.to_string().bold());
            }
            Err(error) => eprintln!("{}", error.to_string().red()),
        }
    }

    async fn ask(&self, controller: &ChatController, session: &mut Session, text: &str) {
        // The listing is fetched again on every turn, as each chat render does.
        controller.refresh_packs(session).await;
        print_turn(&Turn::user(text));

        match controller
            .submit(session, text, &self.attachments, &self.selection)
            .await
        {
            TurnOutcome::Answered(message) => print_turn(&Turn::assistant(message)),
            TurnOutcome::Failed(failure) => eprintln!("{}", failure.description.red()),
            TurnOutcome::Rejected(error) => eprintln!("{}", error.to_string().red()),
            TurnOutcome::NotLoggedIn => {
                tracing::error!(target: TRACING_TARGET, "Chat page reached without a token");
                eprintln!("{}", "Not logged in.".red());
            }
        }
    }
}

fn print_help() {
    for (name, description) in COMMANDS {
        println!("  {:<10} {}", name.bright_cyan(), description);
    }
    println!("  Anything else is sent as a question.");
}

fn print_packs(packs: &[Pack], selection: &PackSelection) {
    if packs.is_empty() {
        println!(
            "{}",
            "No packs available or failed to fetch packs.".yellow()
        );
        return;
    }

    let selected = selection.to_string();
    for option in PackSelection::options(packs) {
        let marker = if option == selected { "*" } else { " " };
        println!(" {marker} {option}");
    }
}

fn print_history(session: &Session) {
    println!("{}", "Conversation History".bold());
    for turn in session.history() {
        print_turn(turn);
    }
}

fn print_turn(turn: &Turn) {
    let label = match turn.role {
        Role::User => "User:".bold().green(),
        Role::Assistant => "Assistant:".bold().cyan(),
    };
    println!("{label} {}", turn.content);
}
