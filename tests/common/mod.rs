#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use gigalixir_deploy::cmd::{CommandRunner, format_command};
use gigalixir_deploy::error::{DeployError, DeployResult};

enum Reply {
    Stdout(String),
    Fail,
}

struct Rule {
    prefix: String,
    replies: VecDeque<Reply>,
}

/// Records every command and answers by command-line prefix.
///
/// Replies for a prefix are consumed in order; the last one
/// repeats. Commands with no rule succeed with empty stdout.
pub struct ScriptedRunner {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<String>>,
    installed: bool,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            rules: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            installed: false,
        }
    }

    pub fn installed(mut self) -> Self {
        self.installed = true;
        self
    }

    pub fn reply(self, prefix: &str, stdout: &str) -> Self {
        self.push(prefix, Reply::Stdout(stdout.to_string()));
        self
    }

    pub fn fail(self, prefix: &str) -> Self {
        self.push(prefix, Reply::Fail);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn push(&self, prefix: &str, reply: Reply) {
        let mut rules = self.rules.borrow_mut();
        if let Some(rule) = rules.iter_mut().find(|r| r.prefix == prefix) {
            rule.replies.push_back(reply);
        } else {
            rules.push(Rule {
                prefix: prefix.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
    }

    fn answer(&self, program: &str, args: &[&str]) -> DeployResult<String> {
        let command = format_command(program, args);
        self.calls.borrow_mut().push(command.clone());

        let mut rules = self.rules.borrow_mut();
        let Some(rule) = rules.iter_mut().find(|r| command.starts_with(&r.prefix)) else {
            return Ok(String::new());
        };

        let reply = if rule.replies.len() > 1 {
            rule.replies.pop_front()
        } else {
            None
        };
        let reply = reply.as_ref().or_else(|| rule.replies.front());

        match reply {
            Some(Reply::Stdout(out)) => Ok(out.clone()),
            Some(Reply::Fail) => Err(DeployError::CommandFailed {
                command,
                code: Some(1),
            }),
            None => Ok(String::new()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> DeployResult<String> {
        self.answer(program, args)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> DeployResult<()> {
        self.answer(program, args).map(|_| ())
    }

    fn command_exists(&self, _program: &str) -> bool {
        self.installed
    }
}

/// `gigalixir ps` output with `desired` replicas and pods given
/// as `(version, status)`.
pub fn ps_json(desired: usize, pods: &[(u64, &str)]) -> String {
    let pods: Vec<_> = pods
        .iter()
        .map(|(version, status)| {
            serde_json::json!({ "version": version.to_string(), "status": status })
        })
        .collect();
    serde_json::json!({ "replicas_desired": desired, "pods": pods }).to_string()
}
