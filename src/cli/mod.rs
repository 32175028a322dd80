//! CLI commands for moltmsg using clap.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::{load_settings, Settings};
use crate::core::{DispatchError, InboxMessage, Messenger};
use crate::platform::ScriptPlatform;
use crate::registry::{AgentRecord, FileRegistry};

/// moltmsg - agent-to-agent messaging over Moltbook mentions.
#[derive(Parser)]
#[command(name = "moltmsg")]
#[command(version)]
#[command(about = "Moltbook Agent Messenger", long_about = None)]
pub struct Commands {
    /// Moltbook skill directory
    #[arg(long, global = true, env = "MOLTMSG_SKILL_PATH")]
    pub skill_path: Option<PathBuf>,

    /// Agent registry file
    #[arg(long = "registry", global = true, env = "MOLTMSG_REGISTRY")]
    pub registry_path: Option<PathBuf>,

    /// Timeout for each platform call, in seconds
    #[arg(long = "timeout", global = true, env = "MOLTMSG_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a message to an agent
    Send {
        /// Agent name or ID
        recipient: String,

        /// Message content
        message: String,
    },

    /// Check for messages
    Inbox {
        /// Limit results
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// List available agents
    List {
        /// Filter by capability
        #[arg(long)]
        capability: Option<String>,
    },

    /// Show the registry entry an agent name or ID resolves to
    Show {
        /// Agent name or ID
        agent: String,
    },

    /// Show which agent this process acts as
    Whoami,
}

impl Commands {
    /// Run the command.
    ///
    /// Failures already reported to the user come back as `ExitCode::FAILURE`;
    /// `Err` is reserved for setup problems such as an unreadable registry.
    pub async fn run(&self) -> Result<ExitCode> {
        let settings = load_settings()?.with_overrides(
            self.skill_path.clone(),
            self.registry_path.clone(),
            self.timeout_secs,
        )?;
        let messenger = build_messenger(&settings);

        match &self.command {
            Command::Send { recipient, message } => cmd_send(&messenger, recipient, message).await,
            Command::Inbox { limit } => cmd_inbox(&messenger, *limit).await,
            Command::List { capability } => cmd_list(&messenger, capability.as_deref()),
            Command::Show { agent } => cmd_show(&messenger, agent),
            Command::Whoami => cmd_whoami(&messenger).await,
        }
    }
}

fn build_messenger(settings: &Settings) -> Messenger {
    let registry = FileRegistry::new(settings.registry_file());
    let platform = ScriptPlatform::from_settings(settings);
    tracing::debug!(
        "Using registry {} and platform script {}",
        registry.path().display(),
        platform.script().display()
    );
    Messenger::new(Arc::new(registry), Arc::new(platform))
}

// Command implementations

async fn cmd_send(messenger: &Messenger, recipient: &str, message: &str) -> Result<ExitCode> {
    match messenger.send(recipient, message).await {
        Ok(sent) => {
            println!("✅ Message sent to @{}", sent.recipient);
            Ok(ExitCode::SUCCESS)
        }
        Err(DispatchError::Registry(e)) => Err(e.into()),
        Err(e) => {
            println!("{}", render_send_failure(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_inbox(messenger: &Messenger, limit: usize) -> Result<ExitCode> {
    let me = match messenger.whoami().await {
        Ok(me) => me,
        Err(e) => {
            println!("❌ Could not determine my agent name: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let messages = messenger.check_inbox(&me, limit).await;
    print!("{}", render_inbox(&messages));
    Ok(ExitCode::SUCCESS)
}

fn cmd_list(messenger: &Messenger, capability: Option<&str>) -> Result<ExitCode> {
    let agents = messenger.list_agents(capability)?;
    print!("{}", render_agents(&agents));
    Ok(ExitCode::SUCCESS)
}

fn cmd_show(messenger: &Messenger, token: &str) -> Result<ExitCode> {
    match messenger.resolve(token)? {
        Some(agent) => {
            print!("{}", render_agent(&agent));
            println!("  ID: {}", agent.id);
            println!("  Mailbox: {}", agent.post_id.as_deref().unwrap_or("none"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("❌ Agent not found: {}", token);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_whoami(messenger: &Messenger) -> Result<ExitCode> {
    match messenger.whoami().await {
        Ok(me) => {
            println!("{}", me.mention());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("❌ Could not determine my agent name: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

// Rendering

fn render_send_failure(error: &DispatchError) -> String {
    match error {
        DispatchError::AgentNotFound { token, known } => format!(
            "❌ Agent not found: {}\n   Available agents: {:?}",
            token, known
        ),
        other => format!("❌ {}", other),
    }
}

/// Timestamp as shown in the inbox: second precision, UTC.
fn display_time(created_at: Option<&str>) -> String {
    let Some(raw) = created_at.filter(|s| !s.is_empty()) else {
        return "unknown".to_string();
    };

    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
        Err(_) => raw.chars().take(19).collect(),
    }
}

fn render_inbox(messages: &[InboxMessage]) -> String {
    if messages.is_empty() {
        return "📭 No new messages\n".to_string();
    }

    let mut out = format!("📬 {} messages found:\n\n", messages.len());
    for msg in messages {
        out.push_str(&format!("From: @{}\n", msg.from));
        out.push_str(&format!("Time: {} UTC\n", display_time(msg.created_at.as_deref())));
        out.push_str(&format!("Content: {}\n", msg.content));
        out.push_str(&format!("{}\n", "-".repeat(40)));
    }
    out
}

fn render_agent(agent: &AgentRecord) -> String {
    let mut out = format!(
        "@{} - {}\n",
        agent.name,
        agent.description.as_deref().unwrap_or("No description")
    );
    if !agent.capabilities.is_empty() {
        out.push_str(&format!("  Capabilities: {}\n", agent.capabilities.join(", ")));
    }
    out.push_str(&format!("  Karma: {}\n", agent.karma));
    out
}

fn render_agents(agents: &[AgentRecord]) -> String {
    if agents.is_empty() {
        return "No agents found\n".to_string();
    }

    let mut out = format!("🦀 {} agents:\n\n", agents.len());
    for agent in agents {
        out.push_str(&render_agent(agent));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InboxKind;

    #[test]
    fn parses_send_with_global_overrides() {
        let cmds = Commands::try_parse_from([
            "moltmsg",
            "--registry",
            "/tmp/agents.json",
            "send",
            "nova",
            "status?",
        ])
        .unwrap();

        assert_eq!(cmds.registry_path, Some(PathBuf::from("/tmp/agents.json")));
        match cmds.command {
            Command::Send { recipient, message } => {
                assert_eq!(recipient, "nova");
                assert_eq!(message, "status?");
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn inbox_limit_defaults_to_twenty() {
        let cmds = Commands::try_parse_from(["moltmsg", "inbox"]).unwrap();
        assert!(matches!(cmds.command, Command::Inbox { limit: 20 }));
    }

    #[test]
    fn time_is_trimmed_to_seconds() {
        assert_eq!(display_time(Some("2026-01-05T10:11:12.345Z")), "2026-01-05T10:11:12");
        assert_eq!(display_time(Some("2026-01-05 10:11:12.345")), "2026-01-05 10:11:12");
        assert_eq!(display_time(None), "unknown");
        assert_eq!(display_time(Some("")), "unknown");
    }

    #[test]
    fn inbox_rendering() {
        assert_eq!(render_inbox(&[]), "📭 No new messages\n");

        let out = render_inbox(&[InboxMessage {
            kind: InboxKind::Post,
            from: "Nova".into(),
            content: "@Rex hi".into(),
            post_id: "p1".into(),
            created_at: None,
        }]);
        assert!(out.starts_with("📬 1 messages found:"));
        assert!(out.contains("From: @Nova\nTime: unknown UTC\nContent: @Rex hi\n"));
    }

    #[test]
    fn agent_rendering_skips_empty_capabilities() {
        let agent = AgentRecord {
            id: "a1".into(),
            name: "Nova".into(),
            post_id: None,
            capabilities: Vec::new(),
            description: None,
            karma: 3,
        };
        assert_eq!(render_agent(&agent), "@Nova - No description\n  Karma: 3\n");
        assert_eq!(render_agents(&[]), "No agents found\n");
    }

    #[test]
    fn not_found_report_lists_candidates() {
        let report = render_send_failure(&DispatchError::AgentNotFound {
            token: "ghost".into(),
            known: vec!["Nova".into(), "Rex".into()],
        });
        assert_eq!(
            report,
            "❌ Agent not found: ghost\n   Available agents: [\"Nova\", \"Rex\"]"
        );
    }
}
