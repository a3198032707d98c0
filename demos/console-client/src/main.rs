//! Plays from a terminal: prints what is being asked and reads clicks from
//! stdin.
//!
//! Each input line is one of:
//! - a card or player id, e.g. `301`: click it
//! - empty, `space` or `pass`: press the commit key
//! - `key <code>`: press any other key
//!
//! The server URL is the first argument, else `RIPOSTE_URL`, else the
//! default local server.

use riposte::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Input and rendering
// ---------------------------------------------------------------------------

fn parse_line(line: &str, commit_key: u32) -> Option<UiEvent> {
    let line = line.trim();
    match line {
        "" | "space" | "pass" => return Some(UiEvent::Key(commit_key)),
        _ => {}
    }
    if let Some(code) = line.strip_prefix("key ") {
        return code.trim().parse().ok().map(UiEvent::Key);
    }
    line.parse().ok().map(|id| UiEvent::Click(TargetId(id)))
}

fn render(view: &SelectionView) -> String {
    let Some(kind) = view.kind else {
        return "waiting for the server".to_string();
    };
    let join = |ids: &IdSet<TargetId>| {
        ids.iter().map(|id| id.0.to_string()).collect::<Vec<_>>().join(" ")
    };
    let mut out = format!("[{kind}] click: {}", join(&view.selectable));
    if let Some(card) = view.selected {
        out.push_str(&format!(" | selected: {}", card.0));
    }
    if !view.partial.is_empty() {
        out.push_str(&format!(" | chosen: {}", join(&view.partial)));
    }
    out
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    riposte::init_tracing();

    let mut config = ClientConfig::from_env();
    if let Some(url) = std::env::args().nth(1) {
        config.url = url;
    }
    let commit_key = config.commit_key;

    let client = RiposteClient::builder().config(config).connect().await?;

    let mut view = client.subscribe();
    tokio::spawn(async move {
        while view.changed().await.is_ok() {
            let line = render(&view.borrow_and_update());
            println!("{line}");
        }
    });

    let (inputs, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_line(&line, commit_key) {
                Some(event) => {
                    if inputs.send(event).await.is_err() {
                        break;
                    }
                }
                None => tracing::warn!(input = %line, "not an id or key"),
            }
        }
    });

    client.run(rx).await?;
    Ok(())
}
