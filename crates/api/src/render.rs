//! Server-side HTML for the landing page.
//!
//! Sections arrive as [`SectionRenderRequest`]s from the composer; the
//! template walks them in order, so visibility and ordering are decided in
//! one place. The static copy for the non-hero sections lives here.

use askama::Template;
use lander_core::composer::{PageSnapshot, SectionRenderRequest};
use lander_core::hero::MEDIA_PATH_PREFIX;
use lander_core::reveal::RevealGate;

/// Path of the reveal countdown stream the page subscribes to.
pub const REVEAL_STREAM_PATH: &str = "/api/v1/page/reveal";

pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct CourseModule {
    pub title: &'static str,
    pub topics: [&'static str; 3],
}

pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub rating: usize,
}

impl Testimonial {
    pub fn stars(&self) -> String {
        "★".repeat(self.rating)
    }
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const BENEFITS: [Benefit; 4] = [
    Benefit {
        title: "Método Prático e Direto",
        description: "Sem rodeios ou complicações. Aprenda exatamente o que precisa para começar a investir.",
    },
    Benefit {
        title: "Linguagem Simples",
        description: "Explicações claras e diretas, sem jargões técnicos complicados.",
    },
    Benefit {
        title: "Resultados Reais",
        description: "Estratégias testadas e aprovadas por centenas de alunos.",
    },
    Benefit {
        title: "Suporte Completo",
        description: "Acompanhamento durante toda sua jornada de aprendizado.",
    },
];

pub const CURRICULUM: [CourseModule; 4] = [
    CourseModule {
        title: "Módulo 1: Fundamentos Financeiros",
        topics: [
            "Organizando suas finanças",
            "Criando reserva de emergência",
            "Planejamento financeiro básico",
        ],
    },
    CourseModule {
        title: "Módulo 2: Primeiros Investimentos",
        topics: [
            "Renda fixa sem mistérios",
            "Tesouro Direto na prática",
            "Escolhendo os melhores investimentos",
        ],
    },
    CourseModule {
        title: "Módulo 3: Renda Passiva",
        topics: [
            "Dividendos e renda passiva",
            "Construindo sua carteira",
            "Estratégias de longo prazo",
        ],
    },
    CourseModule {
        title: "Módulo 4: Rumo ao Primeiro Milhão",
        topics: [
            "Acelerando seus resultados",
            "Proteção patrimonial",
            "Multiplicando seus ganhos",
        ],
    },
];

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Carlos Silva",
        role: "Iniciante em Investimentos",
        content: "Em apenas 3 meses já consegui organizar minhas finanças e começar a investir. O método é realmente direto e prático!",
        rating: 5,
    },
    Testimonial {
        name: "Ana Paula",
        role: "Professora",
        content: "Nunca pensei que investir poderia ser tão simples. O curso mudou completamente minha visão sobre dinheiro.",
        rating: 5,
    },
    Testimonial {
        name: "Roberto Santos",
        role: "Aposentado",
        content: "Mesmo com mais de 60 anos, consegui aprender a investir. A linguagem clara e direta faz toda diferença.",
        rating: 5,
    },
];

pub const FAQS: [Faq; 4] = [
    Faq {
        question: "Preciso ter experiência prévia com investimentos?",
        answer: "Não! O curso foi desenvolvido pensando em quem está começando do zero. Tudo é explicado de forma simples e progressiva.",
    },
    Faq {
        question: "Quanto tempo tenho acesso ao curso?",
        answer: "O acesso é vitalício! Você poderá assistir e revisitar o conteúdo quantas vezes quiser, para sempre.",
    },
    Faq {
        question: "Existe suporte para dúvidas?",
        answer: "Sim! Você terá acesso a um grupo exclusivo onde poderá tirar todas as suas dúvidas diretamente com a equipe.",
    },
    Faq {
        question: "Quanto preciso ter para começar a investir?",
        answer: "Você aprenderá a começar com qualquer valor! O importante é iniciar com o que você tem disponível.",
    },
];

/// How the hero video is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEmbed {
    None,
    /// A player page such as a YouTube embed URL.
    Frame,
    /// A direct file, played with `<video>`.
    File,
}

impl VideoEmbed {
    pub fn for_url(url: &str) -> Self {
        const FILE_SUFFIXES: [&str; 4] = [".mp4", ".webm", ".mov", ".ogg"];
        let lower = url.to_ascii_lowercase();
        if url.is_empty() {
            VideoEmbed::None
        } else if url.starts_with(MEDIA_PATH_PREFIX)
            || lower.contains("/media/")
            || FILE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        {
            VideoEmbed::File
        } else {
            VideoEmbed::Frame
        }
    }

    pub fn is_frame(&self) -> bool {
        *self == VideoEmbed::Frame
    }

    pub fn is_file(&self) -> bool {
        *self == VideoEmbed::File
    }
}

/// One composed section, addressed by name from the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot(&'static str);

impl SectionSlot {
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// Hero fields flattened out of the composer's hero request.
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub video_url: String,
    pub video: VideoEmbed,
    pub cta_visible: bool,
    pub reveal_in_secs: u32,
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage<'a> {
    pub snapshot: &'a PageSnapshot,
    pub hero: HeroView,
    /// Composed sections, in render order.
    pub sections: Vec<SectionSlot>,
    pub keywords: String,
    pub gtag_ids: Vec<&'a str>,
    pub ads_raw_tag: Option<&'a str>,
    /// Search Console value when it is a bare verification token.
    pub search_console_token: Option<&'a str>,
    /// Search Console value when it is a full tag.
    pub search_console_tag: Option<&'a str>,
    pub reveal_stream: &'static str,
    pub benefits: &'static [Benefit],
    pub curriculum: &'static [CourseModule],
    pub testimonials: &'static [Testimonial],
    pub faqs: &'static [Faq],
}

impl<'a> LandingPage<'a> {
    pub fn new(snapshot: &'a PageSnapshot, gate: RevealGate) -> Self {
        let composed = snapshot.compose(gate);

        let hero = composed
            .iter()
            .find_map(|section| match section {
                SectionRenderRequest::Hero {
                    title,
                    subtitle,
                    video_url,
                    cta_visible,
                    reveal_in_secs,
                } => Some(HeroView {
                    title: title.clone(),
                    subtitle: subtitle.clone(),
                    video_url: video_url.clone(),
                    video: VideoEmbed::for_url(video_url),
                    cta_visible: *cta_visible,
                    reveal_in_secs: *reveal_in_secs,
                }),
                _ => None,
            })
            .unwrap_or_else(|| HeroView {
                title: snapshot.hero.title.clone(),
                subtitle: snapshot.hero.subtitle.clone(),
                video_url: snapshot.hero.video_url.clone(),
                video: VideoEmbed::for_url(&snapshot.hero.video_url),
                cta_visible: gate.is_revealed(),
                reveal_in_secs: gate.seconds_remaining(),
            });

        let integrations = &snapshot.integrations;
        let search_console = integrations.google_search_console.as_str();
        let (search_console_token, search_console_tag) = if search_console.is_empty() {
            (None, None)
        } else if search_console.starts_with('<') {
            (None, Some(search_console))
        } else {
            (Some(search_console), None)
        };

        Self {
            snapshot,
            hero,
            sections: composed
                .iter()
                .map(|section| SectionSlot(section.name()))
                .collect(),
            keywords: snapshot.seo.keyword_list().join(", "),
            gtag_ids: integrations.gtag_ids(),
            ads_raw_tag: integrations.ads_raw_tag(),
            search_console_token,
            search_console_tag,
            reveal_stream: REVEAL_STREAM_PATH,
            benefits: &BENEFITS,
            curriculum: &CURRICULUM,
            testimonials: &TESTIMONIALS,
            faqs: &FAQS,
        }
    }

    /// First id for the gtag.js loader, when any are configured.
    pub fn gtag_loader_id(&self) -> Option<&str> {
        self.gtag_ids.first().copied()
    }
}
