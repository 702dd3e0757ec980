//! Line-oriented interactive shell over one graph instance.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};

use crate::error::{Result, TunegraphError};
use crate::graph::{
    ask, recommend_artists, recommend_users, GraphView, Layer, RelationExtractor, TypedGraph,
};

const HELP: &str = "\
commands:
  view <layer> | 1-5     show a layer as DOT (all, artists-genres, artists-users, genres, users)
  ra <person> [--enhance] recommend artists
  ru <person>            recommend users
  ? <question>           answer a yes/no relation question
  info <node>            show a node's type and edges
  tell <statement>       add the relations found in a statement
  forget <node>          remove a node and its edges
  help                   show this message
  quit | 6               leave";

const ENHANCE_FLAG: &str = "--enhance";

/// Result of handling one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue(String),
    Quit,
}

/// Interactive front end. Owns the graph it answers for.
pub struct Shell<E: RelationExtractor> {
    graph: TypedGraph,
    extractor: E,
    enhance_default: bool,
}

impl<E: RelationExtractor> Shell<E> {
    pub fn new(graph: TypedGraph, extractor: E) -> Self {
        Self {
            graph,
            extractor,
            enhance_default: false,
        }
    }

    /// Use the enhanced artist pass for `ra` even without `--enhance`.
    pub fn with_enhance_default(mut self, enhance: bool) -> Self {
        self.enhance_default = enhance;
        self
    }

    pub fn graph(&self) -> &TypedGraph {
        &self.graph
    }

    /// Handle one command line.
    pub fn handle(&mut self, line: &str) -> ShellOutcome {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let output = match command {
            "" => String::new(),
            "quit" | "exit" | "6" => return ShellOutcome::Quit,
            "help" => HELP.to_string(),
            "1" | "2" | "3" | "4" | "5" => self.view(command),
            "view" => self.view(if arg.is_empty() { "all" } else { arg }),
            "ra" => self.recommend_artists(arg),
            "ru" => self.recommend_users(arg),
            "?" => self.question(arg),
            "info" => self.info(arg),
            "tell" => self.tell(arg),
            "forget" => self.forget(arg),
            other => format!("unknown command: {} (type 'help')", other),
        };
        ShellOutcome::Continue(output)
    }

    fn view(&self, layer: &str) -> String {
        match layer.parse::<Layer>() {
            Ok(layer) => GraphView::of(&self.graph, layer).to_dot(),
            Err(e) => e.to_string(),
        }
    }

    fn recommend_artists(&self, arg: &str) -> String {
        let (person, enhance) = match arg.strip_suffix(ENHANCE_FLAG) {
            Some(person) => (person.trim(), true),
            None => (arg, self.enhance_default),
        };
        if person.is_empty() {
            return "usage: ra <person> [--enhance]".to_string();
        }
        format_recommendations(person, recommend_artists(&self.graph, person, enhance))
    }

    fn recommend_users(&self, person: &str) -> String {
        if person.is_empty() {
            return "usage: ru <person>".to_string();
        }
        format_recommendations(person, recommend_users(&self.graph, person))
    }

    fn question(&self, question: &str) -> String {
        ask(&self.graph, &self.extractor, question).to_string()
    }

    fn info(&self, id: &str) -> String {
        let Some(node) = self.graph.node(id) else {
            return "node not found".to_string();
        };
        let mut out = format!("type: {}\nedges:", node.node_type);
        if node.edges.is_empty() {
            out.push_str(" none");
        }
        for edge in &node.edges {
            out.push_str(&format!("\n  {} -> {}", edge.label, edge.target));
        }
        out
    }

    fn tell(&mut self, statement: &str) -> String {
        let triples = self.extractor.extract(statement);
        if triples.is_empty() {
            return "no relation found".to_string();
        }
        for t in &triples {
            self.graph.add_node(t.subject.as_str());
            self.graph.add_node(t.object.as_str());
        }
        let mut added = 0;
        for t in &triples {
            if self.graph.add_edge(&t.subject, &t.object, t.relation.as_str()) {
                added += 1;
            }
        }
        log::info!("Added {} relation(s) from shell", added);
        format!("added {} relation(s)", added)
    }

    fn forget(&mut self, id: &str) -> String {
        if self.graph.remove_node(id) {
            format!("removed {}", id)
        } else {
            "node not found".to_string()
        }
    }

    /// Run the shell (reads from stdin, writes to stdout) until EOF or `quit`.
    pub async fn run(&mut self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdin_reader = AsyncBufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            line.clear();
            let bytes_read = stdin_reader.read_line(&mut line).await.map_err(|e| {
                TunegraphError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read from stdin: {}", e),
                ))
            })?;

            // EOF
            if bytes_read == 0 {
                break;
            }

            match self.handle(&line) {
                ShellOutcome::Continue(output) if output.is_empty() => {}
                ShellOutcome::Continue(output) => {
                    stdout.write_all(output.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
                ShellOutcome::Quit => break,
            }
        }

        stdout.flush().await?;
        log::debug!("Shell closed");
        Ok(())
    }
}

fn format_recommendations(person: &str, recommendations: Option<Vec<String>>) -> String {
    match recommendations {
        None => format!("'{}' is not a person in the graph", person),
        Some(recs) if recs.is_empty() => "no recommendations".to_string(),
        Some(recs) => recs.join(", "),
    }
}
