//! Shared harness for revstack-hg integration tests.
//!
//! `ScriptedRunner` stands in for `hg`: it answers commands from a script
//! keyed by the argument vector (with the leading `--config` overrides
//! stripped) and records every call it receives.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use revstack_hg::CommandRunner;
use revstack_utils::UtilError;

type Response = Result<Vec<String>, (i32, String)>;

/// A fake `hg` answering from a script.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: RefCell<HashMap<String, VecDeque<Response>>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `lines`. Repeated calls queue answers in order;
    /// the last answer keeps being returned once the queue drains.
    pub fn on(self, command: impl Into<String>, lines: &[&str]) -> Self {
        self.push(command.into(), Ok(lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// Make `command` exit with `code` and `stderr`.
    pub fn fail(self, command: impl Into<String>, code: i32, stderr: &str) -> Self {
        self.push(command.into(), Err((code, stderr.to_string())));
        self
    }

    fn push(&self, command: String, response: Response) {
        self.responses
            .borrow_mut()
            .entry(command)
            .or_default()
            .push_back(response);
    }

    /// Full argument vectors, including global overrides.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Commands with overrides stripped, space-joined.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| command_key(c)).collect()
    }
}

/// Drop leading `--config <value>` pairs and join the rest.
pub fn command_key(args: &[String]) -> String {
    let mut rest = args;
    while rest.len() >= 2 && rest[0] == "--config" {
        rest = &rest[2..];
    }
    rest.join(" ")
}

impl CommandRunner for ScriptedRunner {
    fn run_captured(&self, args: &[String]) -> Result<Vec<String>, UtilError> {
        self.calls.borrow_mut().push(args.to_vec());
        let key = command_key(args);

        let mut responses = self.responses.borrow_mut();
        let response = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match response {
            Some(Ok(lines)) => Ok(lines),
            Some(Err((code, stderr))) => Err(UtilError::CommandFailed {
                command: format!("hg {}", args.join(" ")),
                code: Some(code),
                stderr,
            }),
            None => Err(UtilError::CommandFailed {
                command: format!("hg {}", args.join(" ")),
                code: Some(255),
                stderr: format!("abort: unscripted command: {}", key),
            }),
        }
    }
}

// ──────────────────────────── Command shapes ────────────────────────────

pub fn config_cmd() -> String {
    "config".to_string()
}

pub fn node_log(revset: &str) -> String {
    format!("log -T {} -r {}", "{node}\\n", revset)
}

pub fn stack_log(revset: &str) -> String {
    format!("log -T {} -r {}", "{rev} {node}\\n", revset)
}

pub fn parent_query(node: &str) -> String {
    format!("log -T {{p1node}} -r {}", node)
}

pub fn children_query(node: &str) -> String {
    format!(
        "log -T {} --hidden -r children({}) and not obsolete()",
        "{node}\\n",
        node
    )
}

/// Children query without the obsolescence filter.
pub fn all_children_query(node: &str) -> String {
    format!("log -T {} --hidden -r children({})", "{node}\\n", node)
}

pub fn successor_query(node: &str) -> String {
    format!(
        "log -T {} --hidden -r (successors({n}) - {n}) and not obsolete()",
        "{rev} {node}\\n",
        n = node
    )
}

pub fn branch_point_query(end: &str) -> String {
    node_log(&format!("roots(draft() and ancestors({}))", end))
}

pub fn rebase_cmd(source: &str, dest: &str) -> String {
    format!("rebase --source {} --dest {}", source, dest)
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
