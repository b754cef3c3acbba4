use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support)
    }

    pub fn with_support(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours command words, flags and chain operators.
    ///
    /// Only escape codes are added; every input character is kept in place so
    /// the editor's cursor arithmetic stays valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len() * 2);
        let mut expect_command = true;
        let mut rest = input;

        while !rest.is_empty() {
            if let Some(op) = [";", "&&", "||"].into_iter().find(|op| rest.starts_with(op)) {
                let operator_style = Style::builder()
                    .foreground(Color::RGB(200, 120, 255))
                    .bold()
                    .build();
                out.push_str(&op.style(operator_style).to_string());
                rest = &rest[op.len()..];
                expect_command = true;
                continue;
            }

            let first_len = rest.chars().next().map_or(1, char::len_utf8);
            if rest.starts_with([' ', '\t']) {
                out.push_str(&rest[..first_len]);
                rest = &rest[first_len..];
                continue;
            }

            let end = rest[first_len..]
                .find([' ', '\t', ';', '&', '|'])
                .map_or(rest.len(), |pos| pos + first_len);
            let word = &rest[..end];

            if expect_command {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                out.push_str(&word.style(command_style).to_string());
            } else if word.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                out.push_str(&word.style(flag_style).to_string());
            } else {
                out.push_str(word);
            }
            expect_command = false;
            rest = &rest[end..];
        }

        out
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.is_enabled() {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.is_enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
