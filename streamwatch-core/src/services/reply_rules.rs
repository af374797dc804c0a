// ========================================================
// File: streamwatch-core/src/services/reply_rules.rs
// ========================================================
//! Canned chat replies. Pure functions over an incoming message; the Discord
//! runtime executes whatever actions come back.

use std::collections::HashSet;

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

lazy_static! {
    /// An amount directly followed by a euro sign, e.g. `4.99€`, `12,50 €`.
    static ref EURO_AMOUNT: Regex = Regex::new(r"(\d+(?:[.,]\d+)?)\s?€")
        .expect("EURO_AMOUNT regex is valid");
}

pub const HEART_REACTION: &str = "🫶";
pub const HEART_REPLY: &str = "EZ fix";

pub const DEFAULT_GIFS: &[&str] = &[
    "https://tenor.com/8HGD.gif",
    "https://tenor.com/bbzBd.gif",
    "https://tenor.com/bTlVO.gif",
    "https://tenor.com/bDjW5.gif",
    "https://tenor.com/Qblv.gif",
    "https://tenor.com/wRdI.gif",
    "https://tenor.com/bF2VS.gif",
];

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author_id: String,
    pub author_is_bot: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyAction {
    /// Reply to the message with this text.
    Reply(String),
    /// Add a unicode reaction to the message.
    React(String),
}

#[derive(Debug, Clone)]
pub struct ReplyConfig {
    /// Authors who get a heart reaction and "EZ fix".
    pub react_user_ids: HashSet<String>,
    /// Authors who get a random gif.
    pub gif_user_ids: HashSet<String>,
    pub gifs: Vec<String>,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            react_user_ids: HashSet::new(),
            gif_user_ids: HashSet::new(),
            gifs: DEFAULT_GIFS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Returns the actions to take for `msg`, in the order they should run.
pub fn evaluate<R: Rng + ?Sized>(
    msg: &IncomingMessage,
    config: &ReplyConfig,
    rng: &mut R,
) -> Vec<ReplyAction> {
    let mut actions = Vec::new();
    if msg.author_is_bot {
        return actions;
    }

    if let Some(reply) = euro_to_dm(&msg.content) {
        actions.push(ReplyAction::Reply(reply));
    }

    if config.react_user_ids.contains(&msg.author_id) {
        actions.push(ReplyAction::React(HEART_REACTION.to_string()));
        actions.push(ReplyAction::Reply(HEART_REPLY.to_string()));
    }

    if config.gif_user_ids.contains(&msg.author_id) && !config.gifs.is_empty() {
        let idx = rng.random_range(0..config.gifs.len());
        actions.push(ReplyAction::Reply(config.gifs[idx].clone()));
    }

    actions
}

/// `"das kostet 5€"` -> `"5€? Das sind 10.00DM!"`. Uses the first amount only.
pub fn euro_to_dm(content: &str) -> Option<String> {
    let caps = EURO_AMOUNT.captures(content)?;
    let amount = caps.get(1)?.as_str();
    let value: f64 = amount.replace(',', ".").parse().ok()?;
    Some(format!("{}€? Das sind {:.2}DM!", amount, value * 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn msg(author: &str, content: &str) -> IncomingMessage {
        IncomingMessage {
            author_id: author.into(),
            author_is_bot: false,
            content: content.into(),
        }
    }

    #[test]
    fn converts_euro_amounts() {
        assert_eq!(euro_to_dm("kostet 5€").as_deref(), Some("5€? Das sind 10.00DM!"));
        assert_eq!(euro_to_dm("nur 4.99 €!").as_deref(), Some("4.99€? Das sind 9.98DM!"));
        assert_eq!(euro_to_dm("12,50€").as_deref(), Some("12,50€? Das sind 25.00DM!"));
        assert_eq!(euro_to_dm("1€ und 2€").as_deref(), Some("1€? Das sind 2.00DM!"));
        assert!(euro_to_dm("no price here").is_none());
        assert!(euro_to_dm("€ alone").is_none());
    }

    #[test]
    fn bots_get_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut m = msg("1", "5€");
        m.author_is_bot = true;
        assert!(evaluate(&m, &ReplyConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn heart_user_gets_reaction_then_reply() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut config = ReplyConfig::default();
        config.react_user_ids.insert("42".into());

        let actions = evaluate(&msg("42", "hello"), &config, &mut rng);
        assert_eq!(
            actions,
            vec![
                ReplyAction::React(HEART_REACTION.into()),
                ReplyAction::Reply(HEART_REPLY.into()),
            ]
        );
        assert!(evaluate(&msg("7", "hello"), &config, &mut rng).is_empty());
    }

    #[test]
    fn gif_user_gets_one_of_the_gifs() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut config = ReplyConfig::default();
        config.gif_user_ids.insert("9".into());

        for _ in 0..20 {
            let actions = evaluate(&msg("9", "hi"), &config, &mut rng);
            assert_eq!(actions.len(), 1);
            match &actions[0] {
                ReplyAction::Reply(url) => assert!(config.gifs.contains(url)),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn rules_compose_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut config = ReplyConfig::default();
        config.react_user_ids.insert("5".into());
        config.gif_user_ids.insert("5".into());

        let actions = evaluate(&msg("5", "3€"), &config, &mut rng);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], ReplyAction::Reply("3€? Das sind 6.00DM!".into()));
        assert_eq!(actions[1], ReplyAction::React(HEART_REACTION.into()));
        assert_eq!(actions[2], ReplyAction::Reply(HEART_REPLY.into()));
    }
}
