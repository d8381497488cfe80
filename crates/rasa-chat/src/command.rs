//! Parsing of input lines.

/// What an input line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Leave the program.
    Quit,
    /// Print the list of commands.
    Help,
    /// Empty the conversation.
    Clear,
    /// Print the connection status.
    Status,
    /// Fetch and print what the bot knows.
    Domain,
    /// Press the quick-reply button with this 1-based number.
    Button(usize),
    /// Send the text to the bot.
    Say(&'a str),
    /// Nothing to do.
    Empty,
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    ///
    /// Only a handful of slash words are commands. Any other input,
    /// including intent payloads such as `/greet`, is sent as is.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(word) = line.strip_prefix('/') else {
            return Command::Say(line);
        };
        match word {
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "?" => Command::Help,
            "clear" => Command::Clear,
            "status" => Command::Status,
            "domain" => Command::Domain,
            _ => match word.parse::<usize>() {
                Ok(n) if n > 0 => Command::Button(n),
                _ => Command::Say(line),
            },
        }
    }
}

/// One-line descriptions of the commands, for `/help`.
pub const HELP: &[(&str, &str)] = &[
    ("/N", "press quick-reply button N of the last bot message"),
    ("/clear", "clear the conversation"),
    ("/status", "show the connection status"),
    ("/domain", "list the bot's intents, entities and actions"),
    ("/help", "show this help"),
    ("/quit", "leave"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("  \n"), Command::Empty);
        assert_eq!(Command::parse("hello there\n"), Command::Say("hello there"));
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse(" /clear "), Command::Clear);
        assert_eq!(Command::parse("/status"), Command::Status);
        assert_eq!(Command::parse("/domain"), Command::Domain);
        assert_eq!(Command::parse("/2"), Command::Button(2));
    }

    #[test]
    fn test_payloads_are_sent() {
        assert_eq!(Command::parse("/greet"), Command::Say("/greet"));
        assert_eq!(
            Command::parse("/inform{\"city\": \"Oslo\"}"),
            Command::Say("/inform{\"city\": \"Oslo\"}")
        );
        assert_eq!(Command::parse("/0"), Command::Say("/0"));
    }
}
