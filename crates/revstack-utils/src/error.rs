/// Base error type for revstack-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("subprocess failed: {command}: {source}")]
    Subprocess {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("subprocess timed out: {command}")]
    SubprocessTimeout { command: String },

    #[error("command failed ({}): {command}{}", exit_label(*code), stderr_suffix(stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "killed by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display_includes_stderr() {
        let err = UtilError::CommandFailed {
            command: "hg rebase --source aaa --dest bbb".into(),
            code: Some(255),
            stderr: "abort: rebase destination is obsolete".into(),
        };
        assert_eq!(
            err.to_string(),
            "command failed (exit status 255): hg rebase --source aaa --dest bbb\n\
             abort: rebase destination is obsolete"
        );
    }

    #[test]
    fn command_failed_display_without_stderr() {
        let err = UtilError::CommandFailed {
            command: "hg log".into(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command failed (killed by signal): hg log");
    }
}
