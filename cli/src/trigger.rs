use {
    anyhow::{bail, Context},
    hello_host::{Request, Trigger},
    tokio::io::{AsyncBufRead, AsyncBufReadExt},
    tracing::warn,
};

pub const HELP: &str = "commands: <enter> or `call`, `add <a> <b>`, `count`, `quit`";

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request(Request),
    Quit,
}

pub fn parse_line(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();

    let command = match words.next() {
        None | Some("call") => Command::Request(Request::Invoke),
        Some("add") => {
            let a = parse_operand(words.next())?;
            let b = parse_operand(words.next())?;
            Command::Request(Request::Add(a, b))
        },
        Some("count") => Command::Request(Request::Increment),
        Some("quit" | "exit") => Command::Quit,
        Some(other) => bail!("unknown command `{other}`"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument `{extra}`");
    }

    Ok(command)
}

fn parse_operand(word: Option<&str>) -> anyhow::Result<i32> {
    let word = word.context("`add` takes two numbers")?;
    word.parse()
        .with_context(|| format!("`{word}` is not a 32-bit integer"))
}

/// Turn lines into requests until `quit`, end of input, or the session going
/// away. Dropping the trigger on return lets the session finish.
pub async fn forward_lines<R>(reader: R, trigger: Trigger) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Command::Request(request)) => {
                if !trigger.send(request).await {
                    break;
                }
            },
            Ok(Command::Quit) => break,
            Err(err) => {
                warn!(%err, %line, "ignoring input");
                eprintln!("{err:#}; {HELP}");
            },
        }
    }

    Ok(())
}

// ----------------------------------- tests -----------------------------------
