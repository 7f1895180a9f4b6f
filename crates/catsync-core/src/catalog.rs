//! The build-time product catalog.
//!
//! Standalone skills and bundles are fixed lists compiled into the binary;
//! the publisher walks them in order and the injector uses the same order
//! when rendering the storefront configuration block. Free and bundle-only
//! skills are not listed here; they never become standalone provider
//! products.

use std::collections::HashSet;

use serde::Serialize;

/// Whether a catalog entry is a standalone skill or a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Skill,
    Bundle,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Skill => write!(f, "skill"),
            ItemKind::Bundle => write!(f, "bundle"),
        }
    }
}

/// A sellable unit as the provider will see it.
///
/// `price_cents` is the final charge in minor currency units (EUR cents).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogItem {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: u32,
}

impl CatalogItem {
    /// Whole-unit price for display, e.g. `149` for `14900` cents.
    #[must_use]
    pub fn price_major(&self) -> u32 {
        self.price_cents / 100
    }
}

pub const SKILLS: &[CatalogItem] = &[
    CatalogItem {
        slug: "ai-b2b-sales-methodology",
        name: "AI-Powered B2B Sales Methodology",
        description: "MEDDPICC+RR, SPICED, negotiation frameworks. 49 files — from first call to closed-won.",
        price_cents: 14900,
    },
    CatalogItem {
        slug: "b2b-presentation-builder",
        name: "B2B Presentation Builder",
        description: "C-level presentations with ROI focus and multi-persona frameworks.",
        price_cents: 7900,
    },
    CatalogItem {
        slug: "janus",
        name: "Janus — Critical Analysis",
        description: "Stress-tests your pitches, plans and proposals across 5 dimensions. No flattery.",
        price_cents: 3900,
    },
    CatalogItem {
        slug: "human-writer",
        name: "HumanWriter",
        description: "Transform AI-generated text into authentic, human-sounding writing.",
        price_cents: 2900,
    },
    CatalogItem {
        slug: "deep-research-agent",
        name: "Deep Research Agent",
        description: "Multi-source research with citations, executive summaries and structured reports.",
        price_cents: 2900,
    },
    CatalogItem {
        slug: "cv-guru",
        name: "CV Guru",
        description: "CV optimization and interview preparation with ATS-friendly formatting.",
        price_cents: 2500,
    },
    CatalogItem {
        slug: "iterative-self-critique",
        name: "Iterative Self-Critique",
        description: "Multi-round self-critique for planning, architecture and strategy tasks.",
        price_cents: 1900,
    },
    CatalogItem {
        slug: "maia",
        name: "MaIA — Multi-Agent Intelligence",
        description: "Orchestrate specialist agents for complex, multi-step projects.",
        price_cents: 2500,
    },
    CatalogItem {
        slug: "memory-manager",
        name: "Memory Manager",
        description: "Persistent cross-session memory system for Claude Code.",
        price_cents: 1900,
    },
    CatalogItem {
        slug: "remotion-best-practices",
        name: "Remotion Best Practices",
        description: "43 rules and patterns for production-grade programmatic video with React.",
        price_cents: 2900,
    },
    CatalogItem {
        slug: "n8n-ai-workflow-expert",
        name: "n8n AI Workflow Expert",
        description: "Create and optimize n8n workflows with AI. From beginner to enterprise automation.",
        price_cents: 3900,
    },
    CatalogItem {
        slug: "ask-to-andrew",
        name: "SchoolPath AI",
        description: "AI guidance counselor for students choosing educational paths.",
        price_cents: 1900,
    },
    CatalogItem {
        slug: "ask-to-vera",
        name: "Vera Career Coach",
        description: "AI career and purpose coach for professionals in transition.",
        price_cents: 2900,
    },
    CatalogItem {
        slug: "llm-arena-vs",
        name: "LLM Arena VS",
        description: "Orchestrate Claude, ChatGPT and Gemini in parallel. Compare. Decide.",
        price_cents: 2500,
    },
    CatalogItem {
        slug: "nano-banana-guru",
        name: "Nano Banana Guru",
        description: "Proactive prompt engineering consultant for Google's visual reasoning model.",
        price_cents: 2500,
    },
    CatalogItem {
        slug: "content-pipeline-pro",
        name: "Content Pipeline Pro",
        description: "Full content creation pipeline from idea to published post.",
        price_cents: 2900,
    },
];

pub const BUNDLES: &[CatalogItem] = &[
    CatalogItem {
        slug: "b2b-sales-pro",
        name: "B2B Sales Pro System",
        description: "4 skills: Sales Methodology + Presentation Builder + Janus + Deep Research. Save 19%.",
        price_cents: 24900,
    },
    CatalogItem {
        slug: "career-navigator",
        name: "Career & Life Navigator",
        description: "4 skills: Vera Career Coach + SchoolPath AI + CV Guru + HumanWriter. Save 37%.",
        price_cents: 7900,
    },
    CatalogItem {
        slug: "n8n-power-pack",
        name: "n8n Power Pack",
        description: "3 skills: n8n Expert + 1500 Workflow Templates + Live Docs. Save on the complete pack.",
        price_cents: 6900,
    },
    CatalogItem {
        slug: "claude-code-mastery",
        name: "Claude Code Mastery",
        description: "5 skills: Skill Creator + Memory Manager + MaIA + LLM Arena + Self-Critique. Save 37%.",
        price_cents: 3900,
    },
    CatalogItem {
        slug: "linkedin-toolkit",
        name: "LinkedIn Toolkit",
        description: "3 skills: Content Pipeline Pro + HumanWriter + Janus. Save on your LinkedIn growth stack.",
        price_cents: 6500,
    },
];

/// All catalog entries in publication order: skills first, then bundles.
#[must_use]
pub fn all_items() -> Vec<(ItemKind, &'static CatalogItem)> {
    SKILLS
        .iter()
        .map(|s| (ItemKind::Skill, s))
        .chain(BUNDLES.iter().map(|b| (ItemKind::Bundle, b)))
        .collect()
}

/// Look up a single catalog entry by slug.
#[must_use]
pub fn find_by_slug(slug: &str) -> Option<(ItemKind, &'static CatalogItem)> {
    all_items().into_iter().find(|(_, item)| item.slug == slug)
}

/// Validate the compiled-in catalog.
///
/// Checked once at publisher start-up so a bad edit to the lists above
/// fails before any network call is made.
///
/// # Errors
///
/// Returns a message describing the first offending entry.
pub fn validate_catalog() -> Result<(), String> {
    validate_items(&all_items())
}

fn validate_items(items: &[(ItemKind, &CatalogItem)]) -> Result<(), String> {
    let mut seen_slugs = HashSet::new();

    for &(kind, item) in items {
        if item.slug.trim().is_empty() {
            return Err(format!("{kind} entry '{}' has an empty slug", item.name));
        }
        if item.name.trim().is_empty() {
            return Err(format!("{kind} '{}' has an empty name", item.slug));
        }
        if item.description.trim().is_empty() {
            return Err(format!("{kind} '{}' has an empty description", item.slug));
        }
        if item.price_cents == 0 {
            return Err(format!("{kind} '{}' has a zero price", item.slug));
        }
        if !seen_slugs.insert(item.slug) {
            return Err(format!("duplicate catalog slug: '{}'", item.slug));
        }
    }

    Ok(())
}
