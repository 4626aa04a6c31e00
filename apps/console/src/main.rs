use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AdminClient, ListController, PageItem, PageSource};
use shared::domain::{UserId, UserStatus};

mod config;

#[derive(Parser, Debug)]
#[command(about = "Administrative console for the charity backend")]
struct Args {
    /// Overrides the configured API base URL.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of users.
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// List one page of events.
    Events {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// List one page of shops.
    Shops {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a user, then refetch the page.
    DeleteUser { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let base_url = args.server_url.unwrap_or(settings.api_base_url);
    let email = args
        .email
        .or(settings.email)
        .context("no email configured; pass --email or set APP__EMAIL")?;
    let password = args
        .password
        .or(settings.password)
        .context("no password configured; pass --password or set APP__PASSWORD")?;

    let client = AdminClient::new(&base_url)?;
    client.login(&email, &password).await?;

    match args.command {
        Command::Users { page, search } => {
            let mut list = ListController::new(client.user_pager());
            open_page(&mut list, page, search).await?;
            for user in list.items() {
                println!(
                    "{:>5}  {:<28} {} {} [{}]",
                    user.id.0,
                    user.email,
                    user.first_name,
                    user.last_name,
                    status_label(user.status)
                );
            }
            print_window(&list);
        }
        Command::Events { page, search } => {
            let mut list = ListController::new(client.event_pager());
            open_page(&mut list, page, search).await?;
            for event in list.items() {
                println!(
                    "{:>5}  {:<28} {}  {}/{} slots  {}",
                    event.id.0,
                    event.title,
                    event.datetime.format("%y/%m/%d %HH%M"),
                    event.participants.len(),
                    event.max_slot,
                    event.location
                );
            }
            print_window(&list);
        }
        Command::Shops { page, search } => {
            let mut list = ListController::new(client.shop_pager());
            open_page(&mut list, page, search).await?;
            for shop in list.items() {
                println!(
                    "{:>5}  {:<28} {} / {}",
                    shop.id.0, shop.name, shop.company.name, shop.location.city
                );
            }
            print_window(&list);
        }
        Command::DeleteUser { id } => {
            let mut list = ListController::new(client.user_pager());
            list.refetch().await?;
            list.delete_entity(UserId(id)).await?;
            println!("user {id} deleted");
        }
    }

    Ok(())
}

async fn open_page<S: PageSource>(
    list: &mut ListController<S>,
    page: u32,
    search: Option<String>,
) -> Result<(), client_core::ClientError> {
    if let Some(term) = search {
        list.set_search_input(term);
    }
    list.submit_search().await?;
    if page > 1 {
        list.goto(page).await?;
    }
    Ok(())
}

fn print_window<S: PageSource>(list: &ListController<S>) {
    let line = list
        .window()
        .items()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == list.page() => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("page {} of {}  {}", list.page(), list.max_pages(), line);
}

fn status_label(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "active",
        UserStatus::Waiting => "waiting",
    }
}
