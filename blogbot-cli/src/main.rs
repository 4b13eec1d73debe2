use std::process;

use anyhow::{Context, Result};
use blogbot_client::{BlogClient, BlogClientError, Post};
use clap::{Parser, Subcommand};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Debug, Parser)]
#[command(name = "blogbot-cli", version, about = "CLI администратора для blogbot-server")]
struct Cli {
    /// Адрес HTTP API.
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Логин администратора (нужен для create/update/delete).
    #[arg(long, global = true, env = "ADMIN_USERNAME")]
    username: Option<String>,

    /// Пароль администратора.
    #[arg(long, global = true, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Проверка доступности API и базы данных.
    Health,
    /// Список постов, новые первыми.
    List,
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста (требует учётные данные).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Обновление поста (требует учётные данные).
    ///
    /// Если `--content` не указан, используется текущее содержимое поста.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста (требует учётные данные).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    // .env может отсутствовать, тогда берём только переменные окружения.
    let _ = dotenvy::dotenv();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli).context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::Health => {
            let health = client.health().await.map_err(map_client_error)?;
            println!("{}: {}", health.status, health.message);
        }
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Create { title, content } => {
            let post = client
                .create_post(&title, &content)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::Update { id, title, content } => {
            let content = match content {
                Some(content) => content,
                None => client.get_post(id).await.map_err(map_client_error)?.content,
            };

            let post = client
                .update_post(id, &title, &content)
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }

    Ok(())
}

fn build_client(cli: &Cli) -> Result<BlogClient, BlogClientError> {
    let client = BlogClient::new(normalize_server(&cli.server))?;
    Ok(match (&cli.username, &cli.password) {
        (Some(username), Some(password)) => client.with_credentials(username, password),
        _ => client,
    })
}

fn normalize_server(server: &str) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server.to_string();
    }

    format!("http://{server}")
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Unauthorized => {
            "требуется авторизация: укажите --username/--password или ADMIN_USERNAME/ADMIN_PASSWORD"
                .to_string()
        }
        BlogClientError::NotFound => "пост не найден".to_string(),
        BlogClientError::Unavailable(message) => format!("сервис недоступен: {message}"),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("created_at: {}", post.created_at.format("%Y-%m-%d %H:%M:%S"));
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());

    for post in posts {
        println!(
            "- [{}] {} ({})",
            post.id,
            post.title,
            post.created_at.format("%d.%m.%Y %H:%M")
        );
    }
}
