//! Fixed marketing copy.

pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Services",
        anchor: "#services",
    },
    NavLink {
        label: "Tools",
        anchor: "#tools",
    },
    NavLink {
        label: "About",
        anchor: "#about",
    },
    NavLink {
        label: "Resources",
        anchor: "#resources",
    },
    NavLink {
        label: "Blog",
        anchor: "#blog",
    },
    NavLink {
        label: "Contact",
        anchor: "#contact",
    },
];

pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub points: &'static [&'static str],
}

pub const SERVICES: &[Service] = &[
    Service {
        icon: "🔐",
        title: "Self-Custody Setup",
        summary: "Take possession of your keys with a setup you understand.",
        points: &[
            "Hardware wallet selection and setup",
            "Seed phrase backup planning",
            "Test transactions before you rely on it",
        ],
    },
    Service {
        icon: "🎓",
        title: "Bitcoin 101",
        summary: "One-on-one or small-group sessions, no jargon required.",
        points: &[
            "What Bitcoin is and what it isn't",
            "Buying without overpaying in fees",
            "Spotting scams before they find you",
        ],
    },
    Service {
        icon: "🏪",
        title: "Merchant Payments",
        summary: "Accept bitcoin at your shop or online store.",
        points: &[
            "Lightning point-of-sale options",
            "Bookkeeping and conversion choices",
            "Staff training",
        ],
    },
    Service {
        icon: "🧭",
        title: "Inheritance Planning",
        summary: "Make sure your bitcoin reaches the people you intend.",
        points: &[
            "Multisig and collaborative custody",
            "Letters of instruction",
            "Working alongside your attorney",
        ],
    },
];

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "We are neighbors who have been using Bitcoin since the early days and have helped hundreds of people in our community take their first steps.",
    "We never hold your keys and never sell you coins. You pay for our time and walk away knowing how your setup works.",
];

pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

pub const RESOURCES: &[Resource] = &[
    Resource {
        title: "Bitcoin.org",
        description: "The project's original home, with a beginner guide.",
        url: "https://bitcoin.org/en/getting-started",
    },
    Resource {
        title: "Bitcoin Optech",
        description: "Weekly technical newsletter for the curious.",
        url: "https://bitcoinops.org/",
    },
    Resource {
        title: "Bitcoin Core",
        description: "Reference full node software.",
        url: "https://bitcoincore.org/",
    },
    Resource {
        title: "Strike",
        description: "Buy, sell and send bitcoin over Lightning.",
        url: "https://strike.me/",
    },
];

pub struct BlogPost {
    pub title: &'static str,
    pub date: &'static str,
    pub excerpt: &'static str,
    pub slug: &'static str,
}

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        title: "Your First Hardware Wallet: A Checklist",
        date: "2024-03-12",
        excerpt: "Ten minutes of preparation saves hours of worry. Here is what to have ready before you unbox.",
        slug: "first-hardware-wallet",
    },
    BlogPost {
        title: "Why We Talk About Fees So Much",
        date: "2024-02-02",
        excerpt: "How the mempool works and when it pays to wait.",
        slug: "why-fees-matter",
    },
    BlogPost {
        title: "Bitcoin for Small Businesses",
        date: "2024-01-08",
        excerpt: "What accepting bitcoin really involves, from checkout to taxes.",
        slug: "bitcoin-for-small-business",
    },
];
