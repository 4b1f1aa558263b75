// Static page content. Nothing here is reflected from user input.

use crate::models::Topic;

pub const HEADLINE: [&str; 4] = [
    "Hi! My name is Katerina👋",
    "I am a Product Manager",
    "specializing in taking",
    "products from 0 to 1.",
];

#[derive(Debug, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
    /// File name offered to the browser when the link is a download.
    pub download: Option<&'static str>,
}

impl Link {
    const fn to(label: &'static str, href: &'static str) -> Self {
        Self { label, href, download: None }
    }

    pub fn is_mail(&self) -> bool {
        self.href.starts_with("mailto:")
    }
}

#[derive(Debug)]
pub enum Inline {
    Text(&'static str),
    Link(Link),
    Break,
}

#[derive(Debug)]
pub struct Bullet {
    pub inlines: &'static [Inline],
    pub note: Option<&'static str>,
}

#[derive(Debug)]
pub enum Piece {
    Paragraph(&'static [Inline]),
    Bullets(&'static [Bullet]),
    LinkRow(&'static [Link]),
}

#[derive(Debug)]
pub struct ContentBlock {
    pub topic: Topic,
    pub pieces: &'static [Piece],
}

impl ContentBlock {
    /// Every link of the block in reading order.
    pub fn links(&self) -> Vec<&'static Link> {
        let mut links = Vec::new();
        for piece in self.pieces {
            match piece {
                Piece::Paragraph(inlines) => collect_links(inlines, &mut links),
                Piece::Bullets(bullets) => {
                    for bullet in *bullets {
                        collect_links(bullet.inlines, &mut links);
                    }
                }
                Piece::LinkRow(row) => links.extend(row.iter()),
            }
        }
        links
    }
}

fn collect_links(inlines: &'static [Inline], out: &mut Vec<&'static Link>) {
    out.extend(inlines.iter().filter_map(|inline| match inline {
        Inline::Link(link) => Some(link),
        _ => None,
    }));
}

pub fn block(topic: Topic) -> &'static ContentBlock {
    match topic {
        Topic::About => &ABOUT,
        Topic::PlayingWithAi => &PLAYING_WITH_AI,
        Topic::Femtech => &FEMTECH,
        Topic::Contact => &CONTACT,
    }
}

static ABOUT: ContentBlock = ContentBlock {
    topic: Topic::About,
    pieces: &[Piece::Paragraph(&[
        Inline::Text(
            "Hi! My name is Katerina 👋 I am a Product Manager specializing in taking products from 0 to 1. \
             Over the past 8+ years in tech, I've worked across product, design, and sales, which has given me \
             a strong understanding of both the commercial and technical sides of building impactful products. \
             I've contributed to the growth of three startups — ",
        ),
        Inline::Link(Link::to("a B2B SaaS platform", "https://www.quanwellbeing.com/")),
        Inline::Text(", "),
        Inline::Link(Link::to("an e-commerce marketplace", "https://www.instagram.com/numrussia/")),
        Inline::Text(", "),
        Inline::Link(Link::to("and a career search website", "https://icanchoose.ru/")),
        Inline::Text("."),
        Inline::Break,
        Inline::Break,
        Inline::Text(
            "In 2020, I joined a well-being startup as a founding member and spent five years building a \
             user-centered product from the ground up, with the goal of setting a new industry standard. \
             Along the way, I learned how to navigate ambiguity, make independent decisions, and rely on data \
             as my compass. I exited the startup after shipping the third version of the app, just as the \
             company was preparing for its acquisition by ",
        ),
        Inline::Link(Link::to(
            "TrueTribe",
            "https://www.jointruetribe.com/nl/library/hr-tech-bedrijf-truetribe-neemt-employee-wellbeing-platform-quan-over",
        )),
        Inline::Text(" in early 2025."),
        Inline::Break,
        Inline::Break,
        Inline::Text("As of May 2025, I'm at "),
        Inline::Link(Link::to("Manychat", "https://manychat.com/product/ai")),
        Inline::Text(", where I work on building AI agents."),
        Inline::Break,
        Inline::Break,
        Inline::Link(Link {
            label: "Download my CV here",
            href: "https://raw.githubusercontent.com/KaterinaPM/katfemtech-site/31e4606b92c1c1e9c9b2ef071b49565d5995771b/public/Katerina%20Stepanova%20-%20Product%20Manager%20CV%20%E2%80%93%20Jan%202025.pdf",
            download: Some("Katerina_Stepanova_CV.pdf"),
        }),
    ])],
};

static PLAYING_WITH_AI: ContentBlock = ContentBlock {
    topic: Topic::PlayingWithAi,
    pieces: &[
        Piece::Paragraph(&[Inline::Text(
            "I love playing with AI tools and new products. You can check some of my projects here:",
        )]),
        Piece::Bullets(&[
            Bullet {
                inlines: &[
                    Inline::Text("my website "),
                    Inline::Link(Link::to("katfemtech.com", "https://katfemtech.com/")),
                    Inline::Text(", which I built using v0"),
                ],
                note: None,
            },
            Bullet {
                inlines: &[
                    Inline::Link(Link::to(
                        "my Christmas self-reflection game",
                        "https://websim.ai/@katerina/ChristmasReflectionGame",
                    )),
                    Inline::Text(", which I built using websim.ai"),
                ],
                note: None,
            },
            Bullet {
                inlines: &[
                    Inline::Link(Link::to(
                        "my personal cycle syncing assistant",
                        "https://katerina.app.n8n.cloud/webhook/f54e17e5-866f-4b80-80fe-9e98ad975cc4/chat",
                    )),
                    Inline::Text(", which I built using n8n"),
                ],
                note: Some(
                    "Please note this AI assistant is for my personal use only, therefore it is protected with a \
                     password. It is connected to my personal calendar, email, and my ChatGPT account. I am happy \
                     to show you the demo during our call",
                ),
            },
        ]),
    ],
};

static FEMTECH: ContentBlock = ContentBlock {
    topic: Topic::Femtech,
    pieces: &[
        Piece::Paragraph(&[Inline::Text(
            "I am passionate about female health, and love to test and review femtech solutions. You can find \
             my content here (@katfemtech on all platforms):",
        )]),
        Piece::LinkRow(&[
            Link::to("Instagram", "https://www.instagram.com/katfemtech/"),
            Link::to("TikTok", "https://www.tiktok.com/@katfemtech"),
            Link::to("YouTube", "https://www.youtube.com/@katfemtech"),
        ]),
    ],
};

static CONTACT: ContentBlock = ContentBlock {
    topic: Topic::Contact,
    pieces: &[
        Piece::Paragraph(&[Inline::Text(
            "I would love to hear from you! Feel free to message me here:",
        )]),
        Piece::LinkRow(&[
            Link::to("LinkedIn", "https://www.linkedin.com/in/katerina-step/"),
            Link::to("email", "mailto:katyaresearcher@gmail.com"),
        ]),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_its_own_block() {
        for topic in Topic::ALL {
            assert_eq!(block(topic).topic, topic);
            assert!(!block(topic).pieces.is_empty());
        }
    }

    #[test]
    fn links_are_listed_in_reading_order() {
        let labels: Vec<_> = block(Topic::Femtech).links().iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Instagram", "TikTok", "YouTube"]);

        let about = block(Topic::About).links();
        assert_eq!(about.len(), 6);
        assert_eq!(about.last().and_then(|l| l.download), Some("Katerina_Stepanova_CV.pdf"));
    }

    #[test]
    fn contact_offers_mail() {
        let links = block(Topic::Contact).links();
        assert!(links.iter().any(|l| l.is_mail()));
    }
}
