/// Pipeline driver: load tokens, tokenize every script, then optionally run them

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::Result;
use crate::execute::{self, Execution};
use crate::options::RunOptions;
use crate::output;
use crate::substitute;
use crate::tokens::TokenTable;

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Generated files, in script order
    pub generated: Vec<PathBuf>,
    /// One entry per executed file; empty unless execution was requested
    pub executions: Vec<Execution>,
}

/// The script tokenizer
pub struct Tokenizer {
    options: RunOptions,
}

impl Tokenizer {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run the whole pipeline
    ///
    /// Execution starts only after every script has been written. A failure
    /// while writing aborts the run; files written before it are kept.
    pub fn run(&self) -> Result<RunSummary> {
        self.options.validate()?;
        let table = TokenTable::load(&self.options.token_file)?;

        let generated = self.generate(&table)?;

        let executions = if self.options.execute_scripts {
            execute::run_all(&generated, self.options.break_on_error)?
        } else {
            Vec::new()
        };

        Ok(RunSummary {
            generated,
            executions,
        })
    }

    /// Write the tokenized copy of every script, in order
    pub fn generate(&self, table: &TokenTable) -> Result<Vec<PathBuf>> {
        let output_dir = self.options.destination_dir();
        let mut generated = Vec::with_capacity(self.options.scripts.len());

        for script in &self.options.scripts {
            let target = output::allocate(script, output_dir, self.options.clobber)?;
            let lines = substitute::tokenize_script(&target.file, &target.path, table, script)?;
            debug!("Tokenized {} lines of {}", lines, script.display());
            info!("Wrote {}", target.path.display());
            generated.push(target.path);
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenizerError;
    use std::fs;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> PathBuf {
        let tokens = dir.path().join("tokens.ini");
        fs::write(&tokens, "[script-tokenizer]\nHOST = prod.example.com\n").unwrap();
        fs::write(dir.path().join("deploy.sh"), "curl HOST/api\n").unwrap();
        tokens
    }

    #[test]
    fn test_run_without_execution() {
        let dir = TempDir::new().unwrap();
        let tokens = setup(&dir);
        let out = dir.path().join("out");

        let options = RunOptions::new(tokens, [dir.path().join("deploy.sh")]).output_dir(&out);
        let summary = Tokenizer::new(options).run().unwrap();

        assert_eq!(summary.generated, vec![out.join("deploy.sh.tok")]);
        assert!(summary.executions.is_empty());
        assert_eq!(
            fs::read_to_string(out.join("deploy.sh.tok")).unwrap(),
            "curl prod.example.com/api\n"
        );
    }

    #[test]
    fn test_conflict_keeps_earlier_outputs() {
        let dir = TempDir::new().unwrap();
        let tokens = setup(&dir);
        fs::write(dir.path().join("second.sh"), "echo HOST\n").unwrap();
        fs::write(dir.path().join("second.sh.tok"), "old").unwrap();

        let options = RunOptions::new(
            tokens,
            [dir.path().join("deploy.sh"), dir.path().join("second.sh")],
        )
        .output_dir(dir.path());
        let err = Tokenizer::new(options).run().unwrap_err();

        assert!(matches!(err, TokenizerError::OutputExists(_)));
        assert!(dir.path().join("deploy.sh.tok").exists());
        assert_eq!(fs::read_to_string(dir.path().join("second.sh.tok")).unwrap(), "old");
    }

    #[test]
    fn test_bad_token_file_writes_nothing() {
        let dir = TempDir::new().unwrap();
        setup(&dir);
        let tokens = dir.path().join("broken.ini");
        fs::write(&tokens, "HOST = no section\n").unwrap();

        let options = RunOptions::new(tokens, [dir.path().join("deploy.sh")]).output_dir(dir.path());
        let err = Tokenizer::new(options).run().unwrap_err();

        assert!(matches!(err, TokenizerError::TokenFileSyntax { .. }));
        assert!(!dir.path().join("deploy.sh.tok").exists());
    }
}
