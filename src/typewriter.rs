/// Character-by-character reveal of a fixed string.
#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Picks the `data-text` value when present, else the element's own text.
    pub fn from_source(data_text: Option<String>, text_content: Option<String>) -> Self {
        let text = data_text
            .filter(|value| !value.is_empty())
            .or(text_content)
            .unwrap_or_default();
        Self::new(&text)
    }

    /// Reveals one more character and returns it, or `None` once complete.
    pub fn step(&mut self) -> Option<char> {
        let next = *self.chars.get(self.shown)?;
        self.shown += 1;
        Some(next)
    }

    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_character_per_step() {
        let mut typer = Typewriter::new("hi!");

        assert_eq!(typer.visible(), "");
        assert_eq!(typer.step(), Some('h'));
        assert_eq!(typer.visible(), "h");
        assert_eq!(typer.step(), Some('i'));
        assert_eq!(typer.step(), Some('!'));
        assert!(typer.is_done());
        assert_eq!(typer.step(), None);
        assert_eq!(typer.visible(), "hi!");
    }

    #[test]
    fn data_attribute_wins_over_text() {
        let typer = Typewriter::from_source(
            Some("Systems engineer".to_string()),
            Some("placeholder".to_string()),
        );

        assert_eq!(typer.chars.len(), "Systems engineer".len());
    }

    #[test]
    fn empty_attribute_falls_back_to_text() {
        let mut typer = Typewriter::from_source(Some(String::new()), Some("ok".to_string()));

        assert_eq!(typer.step(), Some('o'));
    }

    #[test]
    fn multibyte_text_steps_by_character() {
        let mut typer = Typewriter::new("héllo ✨");
        let mut steps = 0;
        while typer.step().is_some() {
            steps += 1;
        }

        assert_eq!(steps, 7);
        assert_eq!(typer.visible(), "héllo ✨");
    }

    #[test]
    fn empty_source_is_done_immediately() {
        let typer = Typewriter::from_source(None, None);

        assert!(typer.is_done());
    }
}
