//! One query from stdin, answer on stdout.

use std::io::{BufRead, Write};

use anyhow::Context;
use packchat_chat::{Composer, PackSelection};
use packchat_core::{
    AuthService, Credentials, PackId, QueryFailure, QueryResult, QueryService, Turn,
};

/// Tracing target for one-shot mode.
const TRACING_TARGET: &str = "packchat_cli::oneshot";

/// Prompts for credentials, message, history and pack id, then performs one
/// login and one query and prints `Chatbot Result: <json>`.
///
/// History is a JSON array of `{"role", "content"}` objects; blank means no
/// history. A blank pack id means no pack. A given pack id must appear in
/// the caller's pack listing, otherwise nothing is sent and the error is
/// printed as the result.
pub async fn run<R, W>(
    auth: &AuthService,
    query: &QueryService,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let email = prompt(input, output, "Enter your email: ")?;
    let password = prompt(input, output, "Enter your password: ")?;

    let token = match auth.authenticate(&Credentials::new(email, password)).await {
        Some(token) if !token.is_empty() => token,
        _ => {
            writeln!(output, "Failed to authenticate. Exiting.")?;
            anyhow::bail!("authentication failed");
        }
    };

    let message = prompt(input, output, "Enter your message: ")?;
    let history = parse_history(&prompt(input, output, "Enter your history: ")?)?;
    let pack_id = PackId::parse(&prompt(input, output, "Enter your pack_id: ")?);

    tracing::debug!(
        target: TRACING_TARGET,
        history_len = history.len(),
        pack_id = ?pack_id,
        "One-shot query"
    );

    let result = match pack_id {
        None => query.query(message, history, None, &token).await,
        Some(pack_id) => {
            let packs = auth.list_packs(&token).await;
            let selection = PackSelection::Id(pack_id);
            match Composer::default().compose(&message, &[], &selection, &packs, &history) {
                Ok(payload) => query.send(payload, &token).await,
                Err(error) => QueryResult::Failure(QueryFailure::other(error.to_string())),
            }
        }
    };

    writeln!(output, "Chatbot Result: {}", result.to_json())?;
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> anyhow::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn parse_history(raw: &str) -> anyhow::Result<Vec<Turn>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(raw)
        .context("history must be a JSON array of {\"role\", \"content\"} objects")
}
