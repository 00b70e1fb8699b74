//! Item 列表的终端客户端

use clap::Parser;
use std::io::{self, BufRead, Write};

use item_crud::client::{
    command::{Command, HELP},
    view::render,
    Confirm, HttpItemsApi, ItemController,
};
use item_crud::infrastructure::logger::Logger;

#[derive(Parser, Debug)]
#[command(name = "item_client")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Item 集合的地址
    #[arg(long, env = "ITEMS_API_URL", default_value = "http://127.0.0.1:5000/api/items")]
    api_url: String,

    /// 日志级别，输出到 stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// 在标准输入上询问 y/N
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    Logger::init_client(&args.log_level)?;

    let api = HttpItemsApi::new(args.api_url);
    let mut controller = ItemController::new(api, StdinConfirm).await;
    println!("{}", render(&controller.state()));
    println!("{}", HELP);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::List => {}
            Command::Reload => controller.load().await,
            Command::New => controller.reset_form(),
            Command::Name(name) => controller.set_form_name(name),
            Command::Description(description) => controller.set_form_description(description),
            Command::Save => controller.save().await,
            Command::Edit(index) => match controller.state().items.get(index).cloned() {
                Some(item) => controller.start_edit(&item),
                None => {
                    println!("no item number {}", index + 1);
                    continue;
                }
            },
            Command::Delete(index) => match controller.state().items.get(index).cloned() {
                Some(item) => controller.delete(&item).await,
                None => {
                    println!("no item number {}", index + 1);
                    continue;
                }
            },
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        println!("{}", render(&controller.state()));
    }

    Ok(())
}
