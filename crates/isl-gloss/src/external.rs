//! Collaborators that live outside the process: a tagger and a constituency
//! parser, both driven over stdin/stdout.

use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use anyhow::{Context, Result, bail};
use isl_grammar::ConstituencyParser;
use isl_types::{AnnotatedToken, ParseTree};

/// Splits text into sentences of tagged tokens.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<Vec<AnnotatedToken>>>;
}

/// Runs a tagger command: text on stdin, JSON `[[token, ...], ...]` on stdout.
#[derive(Clone, Debug)]
pub struct CommandAnnotator {
    program: String,
    args: Vec<String>,
}

impl CommandAnnotator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a whitespace-separated command line. `None` when blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let (program, args) = split_command_line(line)?;
        Some(Self::new(program, args))
    }
}

impl Annotator for CommandAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Vec<AnnotatedToken>>> {
        let stdout = run(&self.program, &self.args, text)?;
        serde_json::from_str(&stdout)
            .with_context(|| format!("decode annotations from {}", self.program))
    }
}

/// Runs a parser command: space-joined words on stdin, bracketed trees on stdout.
#[derive(Clone, Debug)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_command_line(line: &str) -> Option<Self> {
        let (program, args) = split_command_line(line)?;
        Some(Self::new(program, args))
    }
}

impl ConstituencyParser for CommandParser {
    fn parse(&self, words: &[&str]) -> Result<Vec<ParseTree>> {
        let stdout = run(&self.program, &self.args, &words.join(" "))?;
        ParseTree::from_bracketed_many(&stdout)
            .with_context(|| format!("read trees from {}", self.program))
    }
}

fn split_command_line(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn run(program: &str, args: &[String], input: &str) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn {program}"))?;

    // stdin is fed from its own thread while stdout and stderr are drained,
    // so a child that writes before it has read everything cannot stall.
    let stdin = child.stdin.take();
    let (output, written) = thread::scope(|scope| {
        let writer = scope.spawn(move || write_input(stdin, input));
        let output = child.wait_with_output();
        (output, writer.join())
    });

    let output = output.with_context(|| format!("wait for {program}"))?;
    if !output.status.success() {
        bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    match written {
        Ok(result) => result.with_context(|| format!("write input to {program}"))?,
        Err(_) => bail!("input writer for {program} panicked"),
    }
    String::from_utf8(output.stdout).with_context(|| format!("{program} wrote non-UTF-8 output"))
}

fn write_input(stdin: Option<ChildStdin>, input: &str) -> io::Result<()> {
    if let Some(mut stdin) = stdin {
        stdin.write_all(input.as_bytes())?;
        stdin.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_lines() {
        let parser = CommandParser::from_command_line("java -mx1g -jar parser.jar").unwrap();
        assert_eq!(parser.program, "java");
        assert_eq!(parser.args, vec!["-mx1g", "-jar", "parser.jar"]);
        assert!(CommandParser::from_command_line("   ").is_none());
    }

    #[test]
    fn missing_program_is_an_error() {
        let parser = CommandParser::new("definitely-not-a-real-parser-binary", Vec::new());
        let err = parser.parse(&["hello", "there"]).unwrap_err();
        assert!(format!("{err:#}").contains("spawn"));
    }

    #[cfg(unix)]
    #[test]
    fn reads_trees_from_parser_stdout() {
        let parser = CommandParser::new(
            "sh",
            vec![
                "-c".into(),
                "cat > /dev/null; echo '(ROOT (S (NP (PRP I)) (VP (VBP go))))'".into(),
            ],
        );
        let trees = parser.parse(&["I", "go"]).unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].words(), vec!["I", "go"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_stderr() {
        let parser = CommandParser::new(
            "sh",
            vec!["-c".into(), "cat > /dev/null; echo 'no model' >&2; exit 3".into()],
        );
        let err = parser.parse(&["I", "go"]).unwrap_err();
        assert!(err.to_string().contains("no model"));
    }

    #[cfg(unix)]
    #[test]
    fn large_output_before_reading_input_does_not_block() {
        let input = "word ".repeat(200_000);
        let script = r#"head -c 300000 /dev/zero | tr '\000' a; cat > /dev/null"#;
        let stdout = run("sh", &["-c".to_string(), script.to_string()], &input).unwrap();
        assert_eq!(stdout.len(), 300_000);
        assert!(stdout.bytes().all(|b| b == b'a'));
    }

    #[cfg(unix)]
    #[test]
    fn decodes_annotations_from_tagger_stdout() {
        let annotator = CommandAnnotator::new(
            "sh",
            vec![
                "-c".into(),
                r#"cat > /dev/null; echo '[[{"text":"hi","lemma":"hi","pos":"INTJ"}]]'"#.into(),
            ],
        );
        let sentences = annotator.annotate("hi").unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0][0].text, "hi");
    }
}
