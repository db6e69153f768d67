//! Help command handler

use teloxide::{prelude::*, types::Message, Bot};

use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = "🔮 Switch Concierge\n\n\
        /start - Return to the system core\n\
        /events - Browse the annual collective of retreats\n\
        /cart - Review your experience cart\n\
        /journey - Deep neural analysis of your transformation journey\n\
        /ask <question> - Consult the Oracle\n\
        /help - Show this message\n\n\
        Any plain message is treated as a question for the Oracle.";

    bot.send_message(msg.chat.id, help_text).await?;

    Ok(())
}
