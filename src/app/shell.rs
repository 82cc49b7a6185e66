use crate::app::render::{render_form, render_list, render_notification};
use crate::core::controller::{AddOutcome, DirectoryController};
use crate::domain::model::{FormField, RoleFilter};
use crate::domain::ports::DirectoryStore;
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  search <term>            filter by name or technology (empty clears)
  role <All|Frontend|Backend|Full-Stack>
  set <field> <value>      field is name, role, tech or experience
  form                     show the add form
  submit                   add the developer in the form
  refresh                  reload from the directory service
  list                     show the visible developers
  help
  quit
";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Role(RoleFilter),
    Set(FormField, String),
    Form,
    Submit,
    Refresh,
    List,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "search" | "s" => Ok(ShellCommand::Search(rest.to_string())),
        "role" | "r" => rest
            .parse::<RoleFilter>()
            .map(ShellCommand::Role)
            .map_err(|e| e.to_string()),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field.to_ascii_lowercase().as_str() {
                "name" => FormField::Name,
                "role" => FormField::Role,
                "tech" | "techstack" | "tech-stack" => FormField::TechStack,
                "experience" | "exp" => FormField::Experience,
                "" => return Err("usage: set <field> <value>".to_string()),
                other => return Err(format!("unknown field '{}'", other)),
            };
            Ok(ShellCommand::Set(field, value.trim().to_string()))
        }
        "form" => Ok(ShellCommand::Form),
        "submit" => Ok(ShellCommand::Submit),
        "refresh" => Ok(ShellCommand::Refresh),
        "list" | "ls" => Ok(ShellCommand::List),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command '{}' (try help)", other)),
    }
}

/// 互動迴圈：一次處理一行，每個動作都在同一個事件迴圈上完成
pub async fn run_shell<S, R, W>(
    controller: &mut DirectoryController<S>,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    S: DirectoryStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    controller.mount().await;
    write_list(controller, &mut output).await?;

    let mut line = String::new();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) if message.is_empty() => continue,
            Err(message) => {
                output.write_all(format!("{}\n", message).as_bytes()).await?;
                continue;
            }
        };
        tracing::debug!("Shell command: {:?}", command);

        match command {
            ShellCommand::Search(term) => {
                controller.set_search_term(term);
                write_list(controller, &mut output).await?;
            }
            ShellCommand::Role(role_filter) => {
                controller.set_role_filter(role_filter);
                write_list(controller, &mut output).await?;
            }
            ShellCommand::Set(field, value) => {
                if let Err(e) = controller.set_form_field(field, &value) {
                    output.write_all(format!("{}\n", e).as_bytes()).await?;
                }
                write_form(controller, &mut output).await?;
            }
            ShellCommand::Form => write_form(controller, &mut output).await?,
            ShellCommand::Submit => match controller.submit_form().await {
                AddOutcome::Added(_) => write_list(controller, &mut output).await?,
                AddOutcome::Invalid(_) | AddOutcome::Rejected(_) => {
                    write_form(controller, &mut output).await?
                }
            },
            ShellCommand::Refresh => {
                controller.refresh().await;
                write_list(controller, &mut output).await?;
            }
            ShellCommand::List => write_list(controller, &mut output).await?,
            ShellCommand::Help => output.write_all(HELP.as_bytes()).await?,
            ShellCommand::Quit => break,
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_notifications<S, W>(
    controller: &mut DirectoryController<S>,
    output: &mut W,
) -> Result<()>
where
    S: DirectoryStore,
    W: AsyncWrite + Unpin,
{
    for notification in controller.take_notifications() {
        let line = format!("{}\n", render_notification(&notification));
        output.write_all(line.as_bytes()).await?;
    }
    Ok(())
}

async fn write_list<S, W>(
    controller: &mut DirectoryController<S>,
    output: &mut W,
) -> Result<()>
where
    S: DirectoryStore,
    W: AsyncWrite + Unpin,
{
    write_notifications(controller, output).await?;
    let text = render_list(controller.visible(), controller.filter(), controller.fetch_state());
    output.write_all(text.as_bytes()).await?;
    Ok(())
}

async fn write_form<S, W>(
    controller: &mut DirectoryController<S>,
    output: &mut W,
) -> Result<()>
where
    S: DirectoryStore,
    W: AsyncWrite + Unpin,
{
    write_notifications(controller, output).await?;
    let text = render_form(controller.form(), controller.form_errors());
    output.write_all(text.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Role;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("search  React Native "),
            Ok(ShellCommand::Search("React Native".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(ShellCommand::Search(String::new())));
        assert_eq!(
            parse_command("role full-stack"),
            Ok(ShellCommand::Role(RoleFilter::Only(Role::FullStack)))
        );
        assert_eq!(parse_command("ROLE all"), Ok(ShellCommand::Role(RoleFilter::All)));
        assert_eq!(
            parse_command("set tech React, Node.js"),
            Ok(ShellCommand::Set(FormField::TechStack, "React, Node.js".to_string()))
        );
        assert_eq!(
            parse_command("set name Ada Lovelace"),
            Ok(ShellCommand::Set(FormField::Name, "Ada Lovelace".to_string()))
        );
        assert_eq!(parse_command("quit\n"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("role Designer").is_err());
        assert!(parse_command("set salary 10").is_err());
        assert!(parse_command("set").is_err());
        assert!(parse_command("dance").is_err());
        assert_eq!(parse_command("   "), Err(String::new()));
    }
}
