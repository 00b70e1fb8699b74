//! 终端命令解析

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    New,
    Name(String),
    Description(String),
    Save,
    Edit(usize),
    Delete(usize),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list            show items
  reload          fetch items from the server
  new             clear the form (create mode)
  name <text>     set the form name
  desc <text>     set the form description
  save            create or update from the form
  edit <n>        edit item number n
  delete <n>      delete item number n
  help            show this help
  quit            exit";

impl Command {
    /// 解析一行输入。编号从 1 开始，返回的是 0 起的下标
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "new" | "reset" => Ok(Command::New),
            "name" => Ok(Command::Name(rest.to_string())),
            "desc" | "description" => Ok(Command::Description(rest.to_string())),
            "save" => Ok(Command::Save),
            "edit" => parse_index(rest).map(Command::Edit),
            "delete" | "rm" => parse_index(rest).map(Command::Delete),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {} (try `help`)", other)),
        }
    }
}

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected an item number, got `{}`", arg)),
    }
}
