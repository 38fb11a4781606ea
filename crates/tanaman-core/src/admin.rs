//! Admin commands.
//!
//! Commands arrive already parsed as an [`AdminCommand`]. Item names are
//! resolved through one lookup table: the name is lowercased and stripped
//! of whitespace, then matched against catalog ids, catalog display names
//! and a fixed alias list. Every command validates fully before touching
//! the state.

use tracing::info;

use tanaman_ledger::{Holding, LedgerError};
use tanaman_pets::PetError;
use tanaman_types::{Notice, PetSpecies, PetTier, SeedType, ToolKind};

use crate::state::GameState;

/// Default amount for [`AdminCommand::give`].
pub const DEFAULT_GIVE_AMOUNT: u32 = 1;

/// Default amount for [`AdminCommand::give_server`].
pub const DEFAULT_GIVE_SERVER_AMOUNT: u32 = 5;

/// Help text listing every command.
pub const HELP_TEXT: &str = "Commands: /yaping [message], /give [item] [amount?], \
     /giveserver [item] [amount?], /givepet [pet_name] [age]";

/// Why an admin command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    /// The broadcast message is empty.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The item or pet name is empty.
    #[error("item name must not be empty")]
    EmptyName,

    /// The amount must be at least one.
    #[error("invalid amount")]
    InvalidAmount,

    /// No catalog entry or alias matches the name.
    #[error("item not found: {0}")]
    UnknownItem(String),

    /// No pet species matches the name.
    #[error("pet not found: {0}")]
    UnknownPet(String),

    /// The item exists but shops never stock it.
    #[error("shop item not found: {0}")]
    NotShopItem(String),

    /// Granting the item would overflow a counter.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Granting the pet would overflow a counter.
    #[error(transparent)]
    Pet(#[from] PetError),
}

/// A parsed admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// List the commands.
    Help,
    /// Broadcast a message. No state effect.
    Yaping {
        /// Text to broadcast.
        message: String,
    },
    /// Give the player an item.
    Give {
        /// Item name or alias.
        item: String,
        /// Units to give.
        amount: u32,
    },
    /// Give the player one pet and overwrite the species' age.
    GivePet {
        /// Species name or id.
        name: String,
        /// New shared age.
        age: u32,
    },
    /// Put extra stock on the shop shelves.
    GiveServer {
        /// Seed or gear name.
        item: String,
        /// Units to add.
        amount: u32,
    },
}

impl AdminCommand {
    /// A give command; `amount` defaults to one.
    pub fn give(item: impl Into<String>, amount: Option<u32>) -> Self {
        Self::Give {
            item: item.into(),
            amount: amount.unwrap_or(DEFAULT_GIVE_AMOUNT),
        }
    }

    /// A give-server command; `amount` defaults to five.
    pub fn give_server(item: impl Into<String>, amount: Option<u32>) -> Self {
        Self::GiveServer {
            item: item.into(),
            amount: amount.unwrap_or(DEFAULT_GIVE_SERVER_AMOUNT),
        }
    }
}

/// Result of a successful admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminReply {
    /// Feedback for the admin.
    pub notice: Notice,
    /// Message to show every player, for `/yaping`.
    pub broadcast: Option<String>,
}

impl AdminReply {
    fn notice(notice: Notice) -> Self {
        Self {
            notice,
            broadcast: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Item resolution
// ---------------------------------------------------------------------------

/// Anything an admin can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminItem {
    /// Money.
    Money,
    /// A countable holding.
    Holding(Holding),
    /// A pet.
    Pet(PetSpecies),
}

const ALIASES: [(&str, AdminItem); 9] = [
    ("money", AdminItem::Money),
    ("wateringcan", AdminItem::Holding(Holding::Tool(ToolKind::WateringCan))),
    ("penyiramtanaman", AdminItem::Holding(Holding::Tool(ToolKind::WateringCan))),
    ("sizebonus", AdminItem::Holding(Holding::Tool(ToolKind::SizeBonus))),
    ("pupuksuper", AdminItem::Holding(Holding::Tool(ToolKind::SizeBonus))),
    ("superduperspeed", AdminItem::Holding(Holding::Tool(ToolKind::SuperDuperSpeed))),
    ("petshardgold", AdminItem::Holding(Holding::Shard(PetTier::Gold))),
    ("petsharddiamond", AdminItem::Holding(Holding::Shard(PetTier::Diamond))),
    ("petshardrainbow", AdminItem::Holding(Holding::Shard(PetTier::Rainbow))),
];

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn matches_catalog(key: &str, id: &str, display_name: &str) -> bool {
    key == id.to_lowercase() || key == squash(display_name)
}

fn resolve_seed(key: &str) -> Option<SeedType> {
    SeedType::ALL
        .into_iter()
        .find(|seed| matches_catalog(key, seed.id(), seed.definition().name))
}

fn resolve_pet(key: &str) -> Option<PetSpecies> {
    PetSpecies::ALL
        .into_iter()
        .find(|species| matches_catalog(key, species.id(), species.definition().name))
}

/// Resolve an item name. Seeds win over pets, and pets over aliases.
pub fn resolve_item(name: &str) -> Option<AdminItem> {
    let key = squash(name);
    if key.is_empty() {
        return None;
    }
    if let Some(seed) = resolve_seed(&key) {
        return Some(AdminItem::Holding(Holding::Seed(seed)));
    }
    if let Some(species) = resolve_pet(&key) {
        return Some(AdminItem::Pet(species));
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, item)| *item)
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run an admin command against the state.
pub fn execute(state: &mut GameState, command: &AdminCommand) -> Result<AdminReply, AdminError> {
    match command {
        AdminCommand::Help => Ok(AdminReply::notice(Notice::info(HELP_TEXT))),
        AdminCommand::Yaping { message } => {
            let message = message.trim();
            if message.is_empty() {
                return Err(AdminError::EmptyMessage);
            }
            info!(message, "Admin broadcast");
            Ok(AdminReply {
                notice: Notice::info(format!("Global message sent to the server: \"{message}\"")),
                broadcast: Some(message.to_owned()),
            })
        }
        AdminCommand::Give { item, amount } => give(state, item, *amount).map(AdminReply::notice),
        AdminCommand::GivePet { name, age } => give_pet(state, name, *age).map(AdminReply::notice),
        AdminCommand::GiveServer { item, amount } => {
            give_server(state, item, *amount).map(AdminReply::notice)
        }
    }
}

fn give(state: &mut GameState, name: &str, amount: u32) -> Result<Notice, AdminError> {
    if amount == 0 {
        return Err(AdminError::InvalidAmount);
    }
    if squash(name).is_empty() {
        return Err(AdminError::EmptyName);
    }
    let item = resolve_item(name).ok_or_else(|| AdminError::UnknownItem(name.trim().to_owned()))?;
    let text = match item {
        AdminItem::Money => {
            state.ledger.credit_money(u64::from(amount))?;
            format!("Gave {amount} money")
        }
        AdminItem::Holding(holding) => {
            state.ledger.credit(holding, amount)?;
            format!("Gave {amount} {holding}")
        }
        AdminItem::Pet(species) => {
            let owned = state
                .roster
                .owned(species)
                .checked_add(amount)
                .ok_or(PetError::ArithmeticOverflow)?;
            state.roster.set_owned(species, owned);
            format!("Gave {amount} {species}")
        }
    };
    info!(?item, amount, "Admin give");
    Ok(Notice::success(text))
}

fn give_pet(state: &mut GameState, name: &str, age: u32) -> Result<Notice, AdminError> {
    let key = squash(name);
    if key.is_empty() {
        return Err(AdminError::EmptyName);
    }
    let species = resolve_pet(&key).ok_or_else(|| AdminError::UnknownPet(name.trim().to_owned()))?;
    state.roster.add_pet(species)?;
    state.roster.set_age(species, age);
    info!(%species, age, "Admin gave pet");
    Ok(Notice::success(format!("Gave 1 {species} aged {age}")))
}

fn give_server(state: &mut GameState, name: &str, amount: u32) -> Result<Notice, AdminError> {
    if amount == 0 {
        return Err(AdminError::InvalidAmount);
    }
    if squash(name).is_empty() {
        return Err(AdminError::EmptyName);
    }
    let not_stocked = || AdminError::NotShopItem(name.trim().to_owned());
    let holding = match resolve_item(name).ok_or_else(not_stocked)? {
        AdminItem::Holding(holding) => holding,
        AdminItem::Money | AdminItem::Pet(_) => return Err(not_stocked()),
    };
    match holding {
        Holding::Seed(seed) => state.shop.add_seed_stock(seed, amount)?,
        Holding::Tool(tool @ (ToolKind::WateringCan | ToolKind::SizeBonus)) => {
            state.shop.add_tool_stock(tool, amount)?;
        }
        Holding::Tool(ToolKind::SuperDuperSpeed) | Holding::Fruit(..) | Holding::Shard(_) => {
            return Err(not_stocked());
        }
    }
    info!(%holding, amount, "Admin restocked shop");
    Ok(Notice::success(format!("Added {amount} {holding} to every shop on the server")))
}
