// Milon interactive import console
// One session at a time: pick a row, check its assets, save, move on

use anyhow::Result;
use milon_engine::{AssetState, ImportEngine, WorkflowSession};
use milon_spk::VoiceAccent;
use std::io::{self, BufRead, BufReader, Write};

pub struct ImportConsole {
    engine: ImportEngine,
    session: Option<WorkflowSession>,
}

impl ImportConsole {
    pub fn new(engine: ImportEngine) -> Self {
        Self {
            engine,
            session: None,
        }
    }

    /// Run the console loop. When `word` is given the first session is a
    /// manual one for that term instead of the next feed row.
    pub async fn run(&mut self, word: Option<String>) -> Result<()> {
        self.print_banner();

        match word {
            Some(term) => self.open_manual(&term).await,
            None => self.open_next().await,
        }

        let stdin = io::stdin();
        let mut stdin = BufReader::new(stdin.lock());

        loop {
            print!("milon> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.handle_command(line).await {
                Ok(CommandResult::Continue) => continue,
                Ok(CommandResult::Exit) => break,
                Ok(CommandResult::Success(msg)) => {
                    if !msg.is_empty() {
                        println!("✅ {}", msg);
                    }
                }
                Ok(CommandResult::Error(msg)) => {
                    println!("❌ {}", msg);
                }
                Ok(CommandResult::Output(output)) => {
                    println!("{}", output);
                }
                Err(e) => {
                    println!("❌ {}", e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!("Milon Import Console");
        println!(
            "{} entries in store, {} feed rows",
            self.engine.store().words.len(),
            self.engine.rows().len()
        );
        println!("Type 'help' for commands, 'quit' to exit");
        println!();
    }

    fn print_help(&self) {
        println!("Session:");
        println!("  next              - open the next unresolved feed row");
        println!("  new <english>     - open a manual session for a term");
        println!("  show              - show the current session");
        println!("  skip              - skip the current feed row");
        println!("  save              - commit the session and advance");
        println!("Fields:");
        println!("  en <text>         - set the English term");
        println!("  he <text>         - set the Hebrew translation");
        println!("  query <text>      - set the image search query");
        println!("  tts <text>        - set the pronunciation text");
        println!("  tags <a,b,c>      - set tags");
        println!("  level <1-5>       - set difficulty");
        println!("  distract <a b>    - set distractor word ids");
        println!("  letter <on|off>   - toggle the optional first letter");
        println!("  accent <us|uk|au|ca> - set the voice accent");
        println!("Assets:");
        println!("  translate         - translate English to Hebrew");
        println!("  search            - run the image search");
        println!("  pick <n>          - select image candidate n");
        println!("  audio             - generate the pronunciation clip");
        println!("Other:");
        println!("  help, ?           - this message");
        println!("  quit, exit, q     - leave the console");
    }

    async fn handle_command(&mut self, line: &str) -> Result<CommandResult> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0].to_lowercase();
        let rest = line[parts[0].len()..].trim();

        match command.as_str() {
            "quit" | "exit" | "q" => Ok(CommandResult::Exit),
            "help" | "?" => {
                self.print_help();
                Ok(CommandResult::Continue)
            }
            "next" => {
                self.open_next().await;
                Ok(CommandResult::Continue)
            }
            "new" => {
                if rest.is_empty() {
                    return Ok(CommandResult::Error("Usage: new <english term>".to_string()));
                }
                self.open_manual(rest).await;
                Ok(CommandResult::Continue)
            }
            "show" => match &self.session {
                Some(session) => Ok(CommandResult::Output(render_session(session))),
                None => Ok(CommandResult::Error("No open session".to_string())),
            },
            "skip" => self.skip_row(),
            "save" => self.save().await,
            "en" => self.edit(|s| s.set_english(rest)),
            "he" => self.edit(|s| s.set_hebrew(rest)),
            "query" => self.edit(|s| s.image_query = rest.to_string()),
            "tts" => self.edit(|s| s.tts_text = rest.to_string()),
            "tags" => self.edit(|s| s.set_tags_raw(rest)),
            "level" => {
                let level: u8 = match rest.parse() {
                    Ok(level) => level,
                    Err(_) => return Ok(CommandResult::Error("Usage: level <1-5>".to_string())),
                };
                self.try_edit(|s| s.set_difficulty(level))
            }
            "distract" => {
                let ids: Vec<String> = rest.split_whitespace().map(String::from).collect();
                self.edit(|s| s.set_distractors(ids))
            }
            "letter" => {
                let flag = match rest {
                    "on" => true,
                    "off" => false,
                    _ => return Ok(CommandResult::Error("Usage: letter <on|off>".to_string())),
                };
                self.edit(|s| s.set_first_letter_optional(flag))
            }
            "accent" => {
                let accent = match VoiceAccent::parse(rest) {
                    Ok(accent) => accent,
                    Err(e) => return Ok(CommandResult::Error(e.to_string())),
                };
                self.edit(|s| s.accent = accent)
            }
            "translate" => {
                let session = match self.session.as_mut() {
                    Some(session) => session,
                    None => return Ok(CommandResult::Error("No open session".to_string())),
                };
                match self.engine.translate(session).await {
                    Ok(()) => Ok(CommandResult::Success(format!("Hebrew: {}", session.hebrew))),
                    Err(e) => Ok(CommandResult::Error(e.to_string())),
                }
            }
            "search" => {
                let session = match self.session.as_mut() {
                    Some(session) => session,
                    None => return Ok(CommandResult::Error("No open session".to_string())),
                };
                match self.engine.search_images(session).await {
                    Ok(()) => Ok(CommandResult::Output(render_candidates(session))),
                    Err(e) => Ok(CommandResult::Error(e.to_string())),
                }
            }
            "pick" => {
                let index: usize = match rest.parse() {
                    Ok(index) => index,
                    Err(_) => return Ok(CommandResult::Error("Usage: pick <n>".to_string())),
                };
                self.try_edit(|s| s.select_image(index))
            }
            "audio" => {
                let session = match self.session.as_mut() {
                    Some(session) => session,
                    None => return Ok(CommandResult::Error("No open session".to_string())),
                };
                match self.engine.generate_audio(session).await {
                    Ok(()) => Ok(CommandResult::Success("Audio ready".to_string())),
                    Err(e) => Ok(CommandResult::Error(e.to_string())),
                }
            }
            _ => Ok(CommandResult::Error(format!(
                "Unknown command: '{}'. Type 'help' for commands.",
                command
            ))),
        }
    }

    async fn open_next(&mut self) {
        match self.engine.open_next() {
            Some(mut session) => {
                println!(
                    "Row {}: \"{}\"",
                    session.row_index.map_or(0, |i| i),
                    session.english
                );
                for report in self.engine.auto_fill(&mut session).await {
                    println!("⚠️  {}", report);
                }
                println!("{}", render_session(&session));
                self.session = Some(session);
            }
            None => {
                println!("Feed is drained. Use 'new <english>' for manual entry.");
                self.session = None;
            }
        }
    }

    async fn open_manual(&mut self, english: &str) {
        let mut session = self.engine.open_manual(english);
        for report in self.engine.auto_fill(&mut session).await {
            println!("⚠️  {}", report);
        }
        println!("{}", render_session(&session));
        self.session = Some(session);
    }

    fn skip_row(&mut self) -> Result<CommandResult> {
        match self.session.take() {
            Some(session) => {
                if let Some(index) = session.row_index {
                    self.engine.skip(index);
                    Ok(CommandResult::Success(format!("Skipped row {}", index)))
                } else {
                    Ok(CommandResult::Success("Discarded manual session".to_string()))
                }
            }
            None => Ok(CommandResult::Error("No open session".to_string())),
        }
    }

    async fn save(&mut self) -> Result<CommandResult> {
        let session = match self.session.as_ref() {
            Some(session) => session,
            None => return Ok(CommandResult::Error("No open session".to_string())),
        };
        match self.engine.commit(session).await {
            Ok(entry) => {
                self.session = None;
                Ok(CommandResult::Success(format!(
                    "Saved \"{}\" ({}). Type 'next' to continue.",
                    entry.english, entry.id
                )))
            }
            Err(e) => Ok(CommandResult::Error(e.to_string())),
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut WorkflowSession)) -> Result<CommandResult> {
        match self.session.as_mut() {
            Some(session) => {
                apply(session);
                Ok(CommandResult::Output(render_session(session)))
            }
            None => Ok(CommandResult::Error("No open session".to_string())),
        }
    }

    fn try_edit(
        &mut self,
        apply: impl FnOnce(&mut WorkflowSession) -> milon_core::Result<()>,
    ) -> Result<CommandResult> {
        match self.session.as_mut() {
            Some(session) => match apply(session) {
                Ok(()) => Ok(CommandResult::Output(render_session(session))),
                Err(e) => Ok(CommandResult::Error(e.to_string())),
            },
            None => Ok(CommandResult::Error("No open session".to_string())),
        }
    }
}

fn render_session(session: &WorkflowSession) -> String {
    let mut out = String::new();
    out.push_str(&format!("  id:        {}\n", session.word_id()));
    out.push_str(&format!("  english:   {}\n", session.english));
    out.push_str(&format!("  hebrew:    {}\n", session.hebrew));
    out.push_str(&format!("  query:     {}\n", session.image_query));
    out.push_str(&format!("  tts:       {} ({})\n", session.tts_text, session.accent));
    out.push_str(&format!(
        "  tags:      {}  level: {}  letter: {}\n",
        session.tags.join(", "),
        session.difficulty,
        if session.first_letter_optional { "on" } else { "off" }
    ));
    out.push_str(&format!(
        "  image:     {}\n",
        asset_line(session.image_state(), session.selected_image.map(|i| format!("candidate {}", i)))
    ));
    out.push_str(&format!(
        "  audio:     {}\n",
        asset_line(
            session.audio_state(),
            session.audio.as_ref().map(|clip| clip.rel_path.clone())
        )
    ));
    out.push_str(&format!(
        "  savable:   {}",
        if session.savable() { "yes" } else { "no" }
    ));
    out
}

fn asset_line(state: AssetState, detail: Option<String>) -> String {
    match state {
        AssetState::Idle => "idle".to_string(),
        AssetState::Pending => "pending".to_string(),
        AssetState::Ready => match detail {
            Some(detail) => format!("ready ({})", detail),
            None => "ready".to_string(),
        },
    }
}

fn render_candidates(session: &WorkflowSession) -> String {
    if session.candidates.is_empty() {
        return "No results.".to_string();
    }
    let mut out = String::new();
    for (i, candidate) in session.candidates.iter().enumerate() {
        let marker = if session.selected_image == Some(i) { "*" } else { " " };
        out.push_str(&format!(
            "{} [{}] {}  {}\n",
            marker,
            i,
            candidate.tags,
            candidate.best_preview_url().unwrap_or("(no preview)")
        ));
    }
    out.push_str("Use 'pick <n>' to choose.");
    out
}

enum CommandResult {
    Continue,
    Exit,
    Success(String),
    Error(String),
    Output(String),
}
