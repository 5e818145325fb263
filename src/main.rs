use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use fashion_assistant::config::{api::ApiConfig, logging};
use fashion_assistant::modules::auth::{
    controller as auth,
    crud::FileSessionStore,
    schema::{LoginRequest, RegisterRequest},
};
use fashion_assistant::modules::chat::controller::{ChatController, MountOutcome, TurnOutcome};
use fashion_assistant::modules::chat::model::{LoginRedirect, Sender, CATEGORIES};
use fashion_assistant::modules::favorites::{
    controller as favorites, crud::FavoritesCrud, schema::FavoritesQuery,
};
use fashion_assistant::modules::catalog::schema::{ProductQuery, SortOption};
use fashion_assistant::modules::outfits::{
    controller as outfits, crud::OutfitsCrud, model::OutfitItem, schema::OutfitFilter,
};
use fashion_assistant::modules::preferences::{crud::PreferencesCrud, schema::parse_keywords};
use fashion_assistant::modules::stylist::{controller as stylist, crud::StylistCrud};
use fashion_assistant::modules::tryon::{controller as tryon, model::TryOnState};
use fashion_assistant::modules::wardrobe::crud::WardrobeCrud;
use fashion_assistant::services::api::TransportError;
use fashion_assistant::services::liveness::SessionEvent;
use fashion_assistant::AppState;

type Input = Lines<BufReader<Stdin>>;

enum Exit {
    Quit,
    Login,
}

const HELP: &str = "\
Commands:
  /category <name>       pick the product category for your next messages
  /categories            list known categories
  /attach <image path>   attach a photo to your next message
  /tryon <n> <photo>     virtually try on image n of the last reply
  /wardrobe              list your wardrobe
  /favorites             list your favorites
  /search <query>        search the catalog for outfit pieces
  /compose <theme>       compose an outfit around a theme
  /browse [text]         narrow the last results, cheapest first
  /add <n>               add result n to your wardrobe
  /advice <question>     ask the stylist a quick question
  /consult <areas> [| question]
                         book an AI consultation (comma separated focus areas)
  /consultations         list your consultations
  /preferences [k1, k2]  show or replace your style keywords
  /clear                 start over
  /logout                log out
  /quit                  exit";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ApiConfig::from_env()?;
    let store = Arc::new(FileSessionStore::new(&config.session_file));
    let state = AppState::new(config, store)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let mut chat = ChatController::new(state.clone());

        if chat.mount().await? == MountOutcome::RedirectToLogin {
            if !login_flow(&state, &mut input).await? {
                return Ok(());
            }
            continue;
        }

        match chat_loop(&state, &mut chat, &mut input).await? {
            Exit::Quit => return Ok(()),
            Exit::Login => continue,
        }
    }
}

fn prompt(label: &str) {
    print!("{label}");
    let _ = std::io::stdout().flush();
}

async fn ask(input: &mut Input, label: &str) -> Result<Option<String>> {
    prompt(label);
    Ok(input.next_line().await?.map(|l| l.trim().to_string()))
}

/// Returns `false` when the user quits or stdin closes.
async fn login_flow(state: &AppState, input: &mut Input) -> Result<bool> {
    loop {
        let Some(email) = ask(input, "email (or 'register' / 'quit'): ").await? else {
            return Ok(false);
        };

        match email.as_str() {
            "quit" => return Ok(false),
            "register" => {
                let Some(username) = ask(input, "username: ").await? else { return Ok(false) };
                let Some(email) = ask(input, "email: ").await? else { return Ok(false) };
                let Some(password) = ask(input, "password: ").await? else { return Ok(false) };

                match auth::register(state, RegisterRequest { username, email, password }).await {
                    Ok(message) => println!("{message} You can log in now."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            _ => {
                let Some(password) = ask(input, "password: ").await? else { return Ok(false) };

                match auth::login(state, LoginRequest { email, password }).await {
                    Ok(_) => {
                        if let Err(e) = auth::refresh_style_profile(state).await {
                            tracing::debug!("no style profile: {}", e);
                        }
                        return Ok(true);
                    }
                    Err(TransportError::ServerError { message, .. }) => println!("{message}"),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
    }
}

fn render(chat: &ChatController, printed: &mut usize) {
    for message in &chat.transcript().messages()[*printed..] {
        match message.sender() {
            Sender::User => {
                if message.image_base64().is_some() {
                    println!("you: {} [photo attached]", message.text());
                }
            }
            Sender::Bot => {
                println!("assistant: {}", message.text());
                for (i, url) in message.image_urls().iter().enumerate() {
                    println!("  [{}] {}", i + 1, url);
                }
            }
        }
    }
    *printed = chat.transcript().len();
}

async fn follow_redirect(redirect: LoginRedirect) -> Exit {
    tokio::time::sleep(redirect.after).await;
    Exit::Login
}

async fn chat_loop(state: &AppState, chat: &mut ChatController, input: &mut Input) -> Result<Exit> {
    let (_watcher, mut events) = chat.watch_session();
    let mut printed = 0;
    let mut attachment: Option<String> = None;
    let mut results: Vec<OutfitItem> = Vec::new();

    render(chat, &mut printed);
    println!("(type /help for commands)");

    loop {
        prompt(&format!("[{}] > ", chat.category()));

        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { return Ok(Exit::Quit) };
                let line = line.trim();
                let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
                let rest = rest.trim();

                match command {
                    "/quit" => return Ok(Exit::Quit),
                    "/help" => println!("{HELP}"),
                    "/logout" => {
                        auth::logout(state)?;
                        return Ok(Exit::Login);
                    }
                    "/clear" => {
                        chat.clear_chat()?;
                        printed = 0;
                        render(chat, &mut printed);
                    }
                    "/categories" => println!("{}", CATEGORIES.join("\n")),
                    "/category" => match chat.select_category(rest) {
                        Ok(()) => println!("category set to {rest}"),
                        Err(e) => println!("{e}"),
                    },
                    "/attach" => match read_data_url(Path::new(rest)) {
                        Ok(data_url) => {
                            attachment = Some(data_url);
                            println!("photo attached to your next message");
                        }
                        Err(e) => println!("Error: {e:#}"),
                    },
                    "/tryon" => try_on(state, chat, rest).await,
                    "/wardrobe" => {
                        if let Some(redirect) = list_wardrobe(state).await {
                            return Ok(follow_redirect(redirect).await);
                        }
                    }
                    "/favorites" => {
                        if let Some(redirect) = list_favorites(state).await {
                            return Ok(follow_redirect(redirect).await);
                        }
                    }
                    "/search" | "/compose" | "/browse" | "/add" | "/advice" | "/consult"
                    | "/consultations" | "/preferences" => {
                        let redirect = match command {
                            "/search" | "/compose" => find_outfits(state, command, rest, &mut results).await,
                            "/browse" => {
                                browse_results(&results, rest);
                                None
                            }
                            "/add" => add_result(state, &results, rest).await,
                            "/advice" => ask_stylist(state, rest).await,
                            "/consult" => book_consultation(state, rest).await,
                            "/consultations" => list_consultations(state).await,
                            _ => preferences(state, rest).await,
                        };
                        if let Some(redirect) = redirect {
                            return Ok(follow_redirect(redirect).await);
                        }
                    }
                    _ => match chat.send(line, attachment.take()).await {
                        Err(e) => println!("{e}"),
                        Ok(outcome) => {
                            render(chat, &mut printed);
                            if let TurnOutcome::Failed { redirect: Some(redirect), .. } = outcome {
                                return Ok(follow_redirect(redirect).await);
                            }
                        }
                    },
                }
            }
            Some(SessionEvent::Expired) = events.recv() => {
                let redirect = chat.session_ended();
                println!();
                render(chat, &mut printed);
                return Ok(follow_redirect(redirect).await);
            }
        }
    }
}

fn read_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    };
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

async fn try_on(state: &AppState, chat: &ChatController, args: &str) {
    let (index, photo) = args.split_once(' ').unwrap_or((args, ""));

    let Some(images) = chat
        .transcript()
        .messages()
        .iter()
        .rev()
        .map(|m| m.image_urls())
        .find(|urls| !urls.is_empty())
    else {
        println!("No product images to try on yet.");
        return;
    };

    let Some(url) = index.parse::<usize>().ok().and_then(|n| images.get(n.wrapping_sub(1))) else {
        println!("Pick an image between 1 and {}.", images.len());
        return;
    };

    let mut modal = TryOnState::open(url.clone(), format!("Item {index}"));
    match read_data_url(Path::new(photo.trim())) {
        Ok(data_url) => modal.set_photo(data_url),
        Err(e) => {
            println!("Error: {e:#}");
            return;
        }
    }

    println!("Processing try-on, this can take up to a minute...");
    if let Err(e) = tryon::process(state, &mut modal).await {
        tracing::debug!("try-on failed: {}", e);
    }

    match (&modal.result_image, &modal.error) {
        (Some(result), _) => match save_data_url(result, "tryon-result") {
            Ok(path) => println!("Try-on result saved to {path}"),
            Err(e) => println!("Error: {e:#}"),
        },
        (None, Some(error)) => println!("{error}"),
        (None, None) => {}
    }
    modal.close();
}

fn save_data_url(data_url: &str, stem: &str) -> Result<String> {
    let (header, payload) = data_url
        .split_once(',')
        .context("malformed data URL")?;
    let extension = header
        .trim_start_matches("data:image/")
        .split(';')
        .next()
        .filter(|e| !e.is_empty())
        .unwrap_or("png");
    let path = format!("{stem}.{extension}");
    std::fs::write(&path, STANDARD.decode(payload)?)?;
    Ok(path)
}

fn report(e: &TransportError, redirect_delay: std::time::Duration) -> Option<LoginRedirect> {
    println!("{e}");
    e.requires_login().then_some(LoginRedirect { after: redirect_delay })
}

async fn list_wardrobe(state: &AppState) -> Option<LoginRedirect> {
    match WardrobeCrud::new(&state.api).find_all().await {
        Ok(items) if items.is_empty() => println!("Your wardrobe is empty."),
        Ok(items) => {
            for item in items {
                let name = item.custom_name.as_deref().unwrap_or(&item.product_name);
                println!("- {} ({}, {}) [{}]", name, item.category, item.color, item.id);
            }
        }
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

async fn list_favorites(state: &AppState) -> Option<LoginRedirect> {
    match FavoritesCrud::new(&state.api).find_all().await {
        Ok(items) if items.is_empty() => println!("No favorites yet."),
        Ok(items) => {
            let everything = FavoritesQuery {
                price_max: f64::MAX,
                ..FavoritesQuery::default()
            };
            for item in favorites::apply_filters(&items, &everything) {
                println!("- {} by {}: {:.2} {}", item.name, item.brand, item.price, item.currency);
            }
        }
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

fn print_results(items: &[OutfitItem]) {
    for (i, item) in items.iter().enumerate() {
        println!(
            "  [{}] {} by {} ({}, {}): {:.2} {}",
            i + 1,
            item.name,
            item.brand,
            item.category,
            item.color,
            item.price,
            item.currency
        );
    }
}

async fn find_outfits(
    state: &AppState,
    command: &str,
    query: &str,
    results: &mut Vec<OutfitItem>,
) -> Option<LoginRedirect> {
    let filter = OutfitFilter::default();
    let (found, empty_message) = if command == "/compose" {
        (outfits::compose(state, query, &filter).await, outfits::NO_OUTFIT_ITEMS)
    } else {
        (outfits::search(state, query, &filter).await, outfits::NO_SEARCH_RESULTS)
    };

    match found {
        Ok(items) if items.is_empty() => {
            results.clear();
            println!("{empty_message}");
        }
        Ok(items) => {
            print_results(&items);
            *results = items;
        }
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

fn browse_results(results: &[OutfitItem], text: &str) {
    if results.is_empty() {
        println!("Run /search or /compose first.");
        return;
    }

    let query = ProductQuery {
        search: text.to_string(),
        price_max: f64::MAX,
        sort: SortOption::PriceLow,
        ..ProductQuery::default()
    };
    let products = outfits::browse(results, &query);
    if products.is_empty() {
        println!("{}", outfits::NO_SEARCH_RESULTS);
    }
    for product in products {
        println!("- {} by {}: {:.2} {}", product.name, product.brand, product.price, product.currency);
    }
}

async fn add_result(state: &AppState, results: &[OutfitItem], index: &str) -> Option<LoginRedirect> {
    let Some(item) = index.parse::<usize>().ok().and_then(|n| results.get(n.wrapping_sub(1))) else {
        println!("Pick a result between 1 and {}.", results.len());
        return None;
    };

    match OutfitsCrud::new(&state.api).add_to_wardrobe(item).await {
        Ok(message) => println!("{message}"),
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

async fn ask_stylist(state: &AppState, question: &str) -> Option<LoginRedirect> {
    match stylist::ask(state, question).await {
        Ok(advice) => println!("stylist: {advice}"),
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

async fn book_consultation(state: &AppState, args: &str) -> Option<LoginRedirect> {
    let (focus, question) = match args.split_once('|') {
        Some((focus, question)) => (focus, Some(question.trim())),
        None => (args, None),
    };

    let created = match stylist::consultation_for_today(focus, question) {
        Ok(consultation) => StylistCrud::new(&state.api).create(consultation).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(consultation) => println!(
            "Consultation booked for {} ({}) [{}]",
            consultation.date,
            stylist::describe_focus(&consultation.focus_areas),
            consultation.id
        ),
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

async fn list_consultations(state: &AppState) -> Option<LoginRedirect> {
    match StylistCrud::new(&state.api).find_all().await {
        Ok(consultations) if consultations.is_empty() => println!("No consultations yet."),
        Ok(consultations) => {
            for consultation in consultations {
                println!(
                    "- {} {:?}: {} [{}]",
                    consultation.date,
                    consultation.status,
                    stylist::describe_focus(&consultation.focus_areas),
                    consultation.id
                );
                for rec in &consultation.recommendations {
                    println!("    * {}: {}", rec.product_name, rec.reason);
                }
            }
        }
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}

async fn preferences(state: &AppState, args: &str) -> Option<LoginRedirect> {
    let crud = PreferencesCrud::new(&state.api);
    let result = if args.is_empty() {
        crud.find().await.map(|keywords| {
            if keywords.is_empty() {
                "No style keywords saved.".to_string()
            } else {
                keywords.join(", ")
            }
        })
    } else {
        crud.save(&parse_keywords(args)).await
    };

    match result {
        Ok(line) => println!("{line}"),
        Err(e) => return report(&e, state.config.redirect_delay),
    }
    None
}
