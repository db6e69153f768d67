//! Switch Concierge Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use teloxide::{prelude::*, types::Update};
use tracing::{error, info, warn};

use switch_concierge::{
    config::Settings,
    handlers::{
        callbacks::handle_callback_query,
        commands::{cart, events, help, oracle, start},
        messages::handle_message,
    },
    services::ServiceFactory,
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must live until shutdown
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting Switch Concierge bot...");

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services and in-memory session state
    let services = ServiceFactory::new(settings.clone())?;
    let store = SessionStore::new();

    info!("Setting up bot handlers...");

    let services_arc = Arc::new(services);
    let store_arc = Arc::new(store);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![services_arc, store_arc])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook_url) = &settings.bot.webhook_url {
        info!("Webhook URL configured: {}", webhook_url);
        info!("Note: webhook setup not implemented, falling back to polling");
    }

    info!("Switch Concierge is ready, starting polling...");

    dispatcher.dispatch().await;

    info!("Switch Concierge has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Switch Concierge Commands")]
enum BotCommands {
    #[command(description = "Return to the system core")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Browse the annual collective of retreats")]
    Events,
    #[command(description = "Review your experience cart")]
    Cart,
    #[command(description = "Deep neural analysis of your journey")]
    Journey,
    #[command(description = "Consult the Oracle")]
    Ask(String),
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceFactory>,
    store: Arc<SessionStore>,
) -> HandlerResult {
    let services = (*services).clone();
    let store = (*store).clone();

    let result = match cmd {
        BotCommands::Start => start::handle_start(bot, msg, store).await,
        BotCommands::Help => help::handle_help(bot, msg).await,
        BotCommands::Events => events::handle_events(bot, msg, store).await,
        BotCommands::Cart => cart::handle_cart(bot, msg, store).await,
        BotCommands::Journey => oracle::handle_journey(bot, msg, services, store).await,
        BotCommands::Ask(question) => {
            oracle::handle_ask(bot, msg, question, services, store).await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    store: Arc<SessionStore>,
) -> HandlerResult {
    let services = (*services).clone();
    let store = (*store).clone();

    if let Err(e) = handle_message(bot, msg, services, store).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
    store: Arc<SessionStore>,
) -> HandlerResult {
    let services = (*services).clone();
    let store = (*store).clone();

    if let Err(e) = handle_callback_query(bot, query, services, store).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
