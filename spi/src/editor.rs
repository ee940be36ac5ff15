use std::borrow::Cow;

use reedline::{Prompt, Reedline, Signal};

/// Words that end the session when entered on their own.
const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

pub struct Editor {
    editor: Reedline,
    prompt: SpiPrompt,
}

impl Editor {
    #[must_use]
    pub fn new(prompt: String) -> Self {
        use reedline::Vi;

        let edit_mode = Vi::default();

        let editor = Reedline::create().with_edit_mode(Box::new(edit_mode));
        let prompt = SpiPrompt { prompt };

        Self { editor, prompt }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EditorRead {
    Read(String),
    Break,
    Continue,
}

impl EditorRead {
    fn from_line(input: String) -> Self {
        let line = input.trim();
        if line.is_empty() {
            Self::Continue
        } else if EXIT_KEYWORDS.contains(&line) {
            Self::Break
        } else {
            Self::Read(input)
        }
    }
}

impl Editor {
    pub fn read(&mut self) -> std::io::Result<EditorRead> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(input) => Ok(EditorRead::from_line(input)),
            Signal::CtrlC | Signal::CtrlD => Ok(EditorRead::Break),
        }
    }
}

pub struct SpiPrompt {
    prompt: String,
}

impl Prompt for SpiPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.prompt)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            reedline::PromptHistorySearchStatus::Passing => "",
            reedline::PromptHistorySearchStatus::Failing => "failing ",
        };

        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
