use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub badge: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningTab {
    #[default]
    Wallets,
    Learn,
    Tools,
}

const WALLETS: &[LearningEntry] = &[
    LearningEntry {
        title: "Blockstream Jade",
        description: "Open-source hardware wallet with an air-gapped QR mode.",
        url: "https://blockstream.com/jade/",
        badge: Some("Hardware"),
    },
    LearningEntry {
        title: "Coldcard",
        description: "Bitcoin-only signing device built for long-term cold storage.",
        url: "https://coldcard.com/",
        badge: Some("Hardware"),
    },
    LearningEntry {
        title: "Sparrow Wallet",
        description: "Desktop wallet with coin control and multisig support.",
        url: "https://sparrowwallet.com/",
        badge: Some("Desktop"),
    },
    LearningEntry {
        title: "Phoenix",
        description: "Self-custodial Lightning wallet for everyday payments.",
        url: "https://phoenix.acinq.co/",
        badge: Some("Mobile"),
    },
];

const LEARN: &[LearningEntry] = &[
    LearningEntry {
        title: "The Bitcoin Whitepaper",
        description: "Nine pages that started it all.",
        url: "https://bitcoin.org/bitcoin.pdf",
        badge: Some("Essential"),
    },
    LearningEntry {
        title: "The Bitcoin Standard",
        description: "Saifedean Ammous on the history of money and why Bitcoin matters.",
        url: "https://saifedean.com/the-bitcoin-standard/",
        badge: Some("Book"),
    },
    LearningEntry {
        title: "Learn Me A Bitcoin",
        description: "Clear technical explanations of how Bitcoin works.",
        url: "https://learnmeabitcoin.com/",
        badge: None,
    },
    LearningEntry {
        title: "What Bitcoin Did",
        description: "Long-form interviews with builders and thinkers.",
        url: "https://www.whatbitcoindid.com/",
        badge: Some("Podcast"),
    },
];

const TOOLS: &[LearningEntry] = &[
    LearningEntry {
        title: "mempool.space",
        description: "Block explorer and fee estimator.",
        url: "https://mempool.space/",
        badge: Some("Explorer"),
    },
    LearningEntry {
        title: "Clark Moody Dashboard",
        description: "Real-time network and market statistics on one page.",
        url: "https://bitcoin.clarkmoody.com/dashboard/",
        badge: None,
    },
    LearningEntry {
        title: "Bitcoin Treasuries",
        description: "Who holds bitcoin on their balance sheet.",
        url: "https://bitcointreasuries.net/",
        badge: None,
    },
];

impl LearningTab {
    pub const ALL: [LearningTab; 3] = [LearningTab::Wallets, LearningTab::Learn, LearningTab::Tools];

    pub fn title(&self) -> &'static str {
        match self {
            LearningTab::Wallets => "Wallets",
            LearningTab::Learn => "Learn",
            LearningTab::Tools => "Tools",
        }
    }

    pub fn entries(&self) -> &'static [LearningEntry] {
        match self {
            LearningTab::Wallets => WALLETS,
            LearningTab::Learn => LEARN,
            LearningTab::Tools => TOOLS,
        }
    }
}

impl Display for LearningTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LearningTab::Wallets => "wallets",
            LearningTab::Learn => "learn",
            LearningTab::Tools => "tools",
        })
    }
}

impl FromStr for LearningTab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wallets" => Ok(LearningTab::Wallets),
            "learn" => Ok(LearningTab::Learn),
            "tools" => Ok(LearningTab::Tools),
            _ => Err(anyhow::anyhow!("Invalid learning tab: {}", s)),
        }
    }
}

/// Serializable snapshot of one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningView {
    pub tab: LearningTab,
    pub title: &'static str,
    pub entries: &'static [LearningEntry],
}

impl From<LearningTab> for LearningView {
    fn from(tab: LearningTab) -> Self {
        LearningView {
            tab,
            title: tab.title(),
            entries: tab.entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_tab_has_its_own_table() {
        for tab in LearningTab::ALL {
            assert!(!tab.entries().is_empty());
            assert_eq!(tab.to_string().parse::<LearningTab>().unwrap(), tab);
        }
        assert_ne!(LearningTab::Wallets.entries(), LearningTab::Tools.entries());
        assert!(
            LearningTab::Tools
                .entries()
                .iter()
                .all(|e| e.url.starts_with("https://"))
        );
    }

    #[test]
    fn test_learning_view_serializes() {
        let json = serde_json::to_value(LearningView::from(LearningTab::Learn)).unwrap();
        assert_eq!(json["tab"], "learn");
        assert_eq!(json["entries"][0]["title"], "The Bitcoin Whitepaper");
        assert!("videos".parse::<LearningTab>().is_err());
    }
}
