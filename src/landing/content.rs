//! Static marketing copy for the workshop page.

pub const TITLE: &str = "IMERSÃO PLANO PRÁTICO";
pub const TAGLINE: &str =
    "O Método Exato para Transformar Seu Estúdio de Estética em um Negócio Lucrativo e Escalável";
pub const SUBTITLE: &str = "5 horas intensivas de estratégias práticas e comprovadas";
pub const LOGO_URL: &str = "https://marciojordano.com/wp-content/uploads/2025/06/logo-branca_plano-pratico_fundo-transparente-e1759307759545.png";

pub const EVENT_DATE: &str = "26 de Outubro (Domingo)";
pub const EVENT_TIME: &str = "13h às 18h";
pub const EVENT_LOCATION: &str = "Presencial - Bélgica";
pub const FOOTER_LINE: &str = "26 de Outubro, 2025 • 13h às 18h • Presencial - Bélgica";

pub struct Stat {
    pub value: &'static str,
    pub caption: &'static str,
}

pub const RESULTS: &[Stat] = &[
    Stat { value: "100%", caption: "das participantes recomendariam para outras profissionais" },
    Stat { value: "5/5", caption: "Avaliação média de satisfação das participantes" },
    Stat { value: "+30", caption: "Novas estratégias práticas para implementar imediatamente" },
];

pub struct FitItem {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const FOR_YOU: &[FitItem] = &[
    FitItem {
        title: "Você é dona de estúdio de estética",
        detail: "E quer transformar seu negócio em uma máquina de resultados previsíveis e lucrativos",
    },
    FitItem {
        title: "Sua agenda está vazia ou inconsistente",
        detail: "E você quer aprender estratégias comprovadas para lotar sua agenda em até 60 dias",
    },
    FitItem {
        title: "Você é dona de negócio em outra área",
        detail: "E quer transformar seu negócio em uma máquina de resultados previsíveis e lucrativos",
    },
    FitItem {
        title: "Seu financeiro está desorganizado",
        detail: "E você precisa ter clareza total sobre seus números para tomar decisões estratégicas",
    },
];

pub const NOT_FOR_YOU: &[&str] = &[
    "Você procura fórmulas mágicas sem esforço ou comprometimento",
    "Você não está disposta a implementar o que aprenderá",
    "Você quer apenas teoria sem aplicação prática",
];

pub struct Module {
    pub title: &'static str,
    pub topics: &'static [&'static str],
}

pub const PROGRAM: &[Module] = &[
    Module {
        title: "Método Agenda Cheia",
        topics: &[
            "5 estratégias para conseguir 30+ novos clientes em 60 dias",
            "Como criar ofertas irresistíveis que vendem sozinhas",
            "Sistema de follow-up que converte 40% mais",
            "Técnicas de precificação estratégica para aumentar ticket médio",
        ],
    },
    Module {
        title: "Academia de Treinamentos",
        topics: &[
            "Como criar seu primeiro treinamento do zero (mesmo sem experiência)",
            "Estrutura completa para cursos que vendem",
            "Estratégias de lançamento e vendas para treinamentos",
            "Como precificar e posicionar seus cursos no mercado",
        ],
    },
    Module {
        title: "Organização Financeira Total",
        topics: &[
            "Sistema simples para organizar 100% do seu financeiro",
            "Como separar finanças pessoais e empresariais corretamente",
            "Métricas essenciais que todo estúdio deve acompanhar",
            "Planilhas prontas e ferramentas práticas para usar no dia seguinte",
        ],
    },
];

pub struct Trainer {
    pub name: &'static str,
    pub role: &'static str,
    pub photo_url: &'static str,
    pub highlights: &'static [&'static str],
}

pub const TRAINER: Trainer = Trainer {
    name: "Márcio Jordano",
    role: "Especialista em Gestão e Vendas para Estética",
    photo_url: "https://marciojordano.com/wp-content/uploads/2025/10/IMG_0822-1-scaled.jpg",
    highlights: &[
        "Mais de 4 anos de experiência no mercado de estética",
        "Já ajudou mais de +30 estúdios a aumentarem seu faturamento",
        "Criador do método Plano Prático",
        "Abriu seu próprio estúdio e lotou sua agenda em menos de 60 dias",
    ],
};

pub struct Testimonial {
    pub name: &'static str,
    pub video_id: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial { name: "Luciana Claudino", video_id: "5aSBr2c7V30" },
    Testimonial { name: "Iza Lima", video_id: "rNj5rHGvPAM" },
    Testimonial { name: "Cassia Batista", video_id: "MRJeUmwA7qE" },
    Testimonial { name: "Thamirez Santana", video_id: "7GxMHx8q8Es" },
    Testimonial { name: "Paula Dantas", video_id: "UMr9wIrJrt8" },
    Testimonial { name: "Sacha Rebeca", video_id: "17lvJ6wad1M" },
    Testimonial { name: "Rafaela", video_id: "i7GDGWV9wwk" },
];

pub const COHORT_PHOTOS: &[(&str, &str)] = &[
    (
        "https://marciojordano.com/wp-content/uploads/2025/10/IMG_0825-4.jpg",
        "Primeira turma da Imersão Plano Prático",
    ),
    (
        "https://marciojordano.com/wp-content/uploads/2025/10/IMG_0827-4.jpg",
        "Participantes da primeira turma",
    ),
];

pub struct Bonus {
    pub title: &'static str,
    pub detail: &'static str,
    pub value_eur: u32,
}

pub const BONUSES: &[Bonus] = &[
    Bonus {
        title: "Planilha de Organização Financeira Completa",
        detail: "Sistema pronto para controlar receitas, despesas e lucratividade do seu estúdio",
        value_eur: 47,
    },
    Bonus {
        title: "Template de Ofertas Irresistíveis",
        detail: "Modelos prontos para criar promoções que convertem mais de 30%",
        value_eur: 37,
    },
    Bonus {
        title: "Guia Completo de Criação de Treinamentos",
        detail: "Passo a passo detalhado para criar seu primeiro curso em 30 dias",
        value_eur: 67,
    },
    Bonus {
        title: "Grupo de Suporte Exclusivo por 30 Dias",
        detail: "Acesso direto aos instrutores para tirar dúvidas durante a implementação",
        value_eur: 97,
    },
];

pub struct Pricing {
    pub list_price_eur: u32,
    pub price_eur: u32,
    pub discount_label: &'static str,
}

pub const PRICING: Pricing = Pricing {
    list_price_eur: 345,
    price_eur: 97,
    discount_label: "70% OFF",
};

pub fn bonus_total_eur() -> u32 {
    BONUSES.iter().map(|b| b.value_eur).sum()
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: &[Faq] = &[
    Faq {
        question: "Preciso ter experiência prévia para participar?",
        answer: "Não! A Imersão Plano Prático foi criada tanto para donas de estúdio iniciantes quanto para as que já têm experiência. O conteúdo é adaptado para que todas possam implementar as estratégias, independente do nível atual.",
    },
    Faq {
        question: "E se eu não puder comparecer no dia?",
        answer: "Como o evento é presencial e temos apenas 10 vagas, recomendamos que confirme sua presença apenas se tiver certeza de que poderá participar. Em casos de emergência, entre em contato conosco para avaliarmos possibilidades.",
    },
    Faq {
        question: "O investimento de €97 inclui tudo?",
        answer: "Sim! O valor de €97 inclui as 5 horas de imersão presencial, todos os materiais, planilhas, templates, certificado de participação e acesso ao grupo de suporte por 30 dias. Não há custos adicionais.",
    },
    Faq {
        question: "Vou receber certificado?",
        answer: "Sim! Todas as participantes recebem certificado digital de conclusão da Imersão Plano Prático.",
    },
    Faq {
        question: "Como funcionam os 30 dias de suporte?",
        answer: "Após a imersão, você terá acesso a um grupo exclusivo no WhatsApp onde poderá tirar dúvidas diretamente com os instrutores durante a implementação das estratégias aprendidas.",
    },
    Faq {
        question: "Preciso levar notebook ou algum material?",
        answer: "Recomendamos levar um caderno para anotações. Todo material digital (planilhas, templates e guias) será enviado por e-mail após o evento.",
    },
    Faq {
        question: "A imersão é realmente presencial? Onde será?",
        answer: "Sim, é 100% presencial na Bélgica. O endereço exato será enviado por e-mail após a confirmação da sua inscrição e pagamento.",
    },
    Faq {
        question: "Posso pagar parcelado?",
        answer: "Entre em contato conosco após preencher o formulário para discutirmos opções de pagamento que se adequem à sua situação.",
    },
];
