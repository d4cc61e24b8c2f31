use vocab_types::{AppEvent, CategoryDraft, CategoryFilter, Id, Page, ReviewCommand, WordDraft};

/// A line typed at the prompt
#[derive(Debug)]
pub enum Command {
    Send(AppEvent),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  go <path>                                   open /, /login, /register, /categories, /words, /flashcards, /quizz
  register <full name> | <email> | <password> | <confirm>
  login <email> <password>
  logout
  cat list | cat search <text> | cat page <n>
  cat add <name> | <description>
  cat edit <id> <name> | <description>
  cat rm <id>
  word list | word search [<text>] [@<category id>]
  word add <word> | <meaning> [| <category id> [| <topic>]]
  word edit <id> <word> | <meaning> [| <category id> [| <topic>]]
  word rm <id>
  card all | card <category id> | next | prev | flip | learned
  dismiss auth|categories|words
  help | quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (head, rest) = split_word(line);
    let event = match head {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "go" => AppEvent::Navigate(required(rest, "go <path>")?.to_string()),
        "register" => {
            let parts = fields(rest);
            let [full_name, email, password, confirm_password] = parts.as_slice() else {
                return Err("usage: register <full name> | <email> | <password> | <confirm>".into());
            };
            AppEvent::Register {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                confirm_password: confirm_password.to_string(),
            }
        }
        "login" => {
            let (email, password) = split_word(rest);
            if email.is_empty() {
                return Err("usage: login <email> <password>".into());
            }
            AppEvent::Login {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "logout" => AppEvent::Logout,
        "cat" => parse_category(rest)?,
        "word" => parse_word(rest)?,
        "card" => AppEvent::Review(ReviewCommand::SelectCategory(parse_filter(required(
            rest,
            "card all|<category id>",
        )?))),
        "next" => AppEvent::Review(ReviewCommand::Next),
        "prev" => AppEvent::Review(ReviewCommand::Previous),
        "flip" => AppEvent::Review(ReviewCommand::Flip),
        "learned" => AppEvent::Review(ReviewCommand::MarkLearned),
        "dismiss" => AppEvent::DismissError(match rest {
            "auth" => Page::Auth,
            "categories" | "cat" => Page::Categories,
            "words" | "word" => Page::Words,
            _ => return Err("usage: dismiss auth|categories|words".into()),
        }),
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Command::Send(event))
}

fn parse_category(rest: &str) -> Result<AppEvent, String> {
    let (action, args) = split_word(rest);
    let event = match action {
        "list" => AppEvent::LoadCategories,
        "search" => AppEvent::SearchCategories(args.to_string()),
        "page" => AppEvent::CategoryPage(
            args.parse()
                .map_err(|_| "usage: cat page <n>".to_string())?,
        ),
        "add" => AppEvent::CreateCategory(category_draft(args)),
        "edit" => {
            let (id, args) = split_word(args);
            AppEvent::UpdateCategory {
                id: parse_id(id)?,
                draft: category_draft(args),
            }
        }
        "rm" => AppEvent::DeleteCategory(parse_id(args)?),
        _ => return Err("usage: cat list|search|page|add|edit|rm".into()),
    };
    Ok(event)
}

fn parse_word(rest: &str) -> Result<AppEvent, String> {
    let (action, args) = split_word(rest);
    let event = match action {
        "list" => AppEvent::LoadWords,
        "search" => {
            let (text, filter) = match args.rsplit_once('@') {
                Some((text, id)) => (text.trim(), CategoryFilter::Only(parse_id(id)?)),
                None => (args, CategoryFilter::All),
            };
            AppEvent::SearchWords {
                text: text.to_string(),
                filter,
            }
        }
        "add" => AppEvent::CreateWord(word_draft(args)?),
        "edit" => {
            let (id, args) = split_word(args);
            AppEvent::UpdateWord {
                id: parse_id(id)?,
                draft: word_draft(args)?,
            }
        }
        "rm" => AppEvent::DeleteWord(parse_id(args)?),
        _ => return Err("usage: word list|search|add|edit|rm".into()),
    };
    Ok(event)
}

fn category_draft(args: &str) -> CategoryDraft {
    let parts = fields(args);
    CategoryDraft::new(
        parts.first().copied().unwrap_or_default(),
        parts.get(1).copied().unwrap_or_default(),
    )
}

fn word_draft(args: &str) -> Result<WordDraft, String> {
    let parts = fields(args);
    let (Some(word), Some(meaning)) = (parts.first(), parts.get(1)) else {
        return Err("usage: word add <word> | <meaning> [| <category id> [| <topic>]]".into());
    };

    let mut draft = WordDraft::new(*word, *meaning);
    if let Some(category) = parts.get(2).filter(|c| !c.is_empty()) {
        draft.category_id = Some(parse_id(category)?);
    }
    if let Some(topic) = parts.get(3) {
        draft.topic = topic.to_string();
    }
    Ok(draft)
}

fn parse_filter(value: &str) -> CategoryFilter {
    match value {
        "all" => CategoryFilter::All,
        id => CategoryFilter::Only(Id::from(id)),
    }
}

fn parse_id(value: &str) -> Result<Id, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("missing id".into());
    }
    Ok(Id::from(value))
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(value)
    }
}

fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

fn fields(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    args.split('|').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> AppEvent {
        match parse(line) {
            Ok(Command::Send(event)) => event,
            other => panic!("'{line}' parsed as {other:?}"),
        }
    }

    #[test]
    fn test_register_fields() {
        match event("register Ann Lee | ann@example.com | 12345678 | 12345678") {
            AppEvent::Register {
                full_name,
                email,
                confirm_password,
                ..
            } => {
                assert_eq!(full_name, "Ann Lee");
                assert_eq!(email, "ann@example.com");
                assert_eq!(confirm_password, "12345678");
            }
            other => panic!("wrong event {other:?}"),
        }
        assert!(parse("register Ann | a@b.com").is_err());
    }

    #[test]
    fn test_category_commands() {
        match event("cat edit 3 Animals | pets") {
            AppEvent::UpdateCategory { id, draft } => {
                assert_eq!(id, Id::Num(3));
                assert_eq!(draft, CategoryDraft::new("Animals", "pets"));
            }
            other => panic!("wrong event {other:?}"),
        }
        assert!(matches!(event("cat page 2"), AppEvent::CategoryPage(2)));
        assert!(parse("cat page two").is_err());
        assert!(parse("cat rm").is_err());
    }

    #[test]
    fn test_word_commands() {
        match event("word add cat | con mèo | 2") {
            AppEvent::CreateWord(draft) => {
                assert_eq!(draft.word, "cat");
                assert_eq!(draft.meaning, "con mèo");
                assert_eq!(draft.category_id, Some(Id::Num(2)));
                assert_eq!(draft.topic, "");
            }
            other => panic!("wrong event {other:?}"),
        }
        match event("word search ca @1") {
            AppEvent::SearchWords { text, filter } => {
                assert_eq!(text, "ca");
                assert_eq!(filter, CategoryFilter::Only(Id::Num(1)));
            }
            other => panic!("wrong event {other:?}"),
        }
        assert!(parse("word add cat").is_err());
    }

    #[test]
    fn test_review_and_misc() {
        assert!(matches!(
            event("card all"),
            AppEvent::Review(ReviewCommand::SelectCategory(CategoryFilter::All))
        ));
        assert!(matches!(event("prev"), AppEvent::Review(ReviewCommand::Previous)));
        assert!(matches!(event("dismiss words"), AppEvent::DismissError(Page::Words)));
        assert!(matches!(parse("  "), Ok(Command::Empty)));
        assert!(matches!(parse("quit"), Ok(Command::Quit)));
        assert!(parse("fly").is_err());
    }
}
