// src/repo/seed.rs
//
// Demo data loaded at startup, standing in for a provisioned database.

use chrono::TimeZone;

use crate::error::AppError;
use crate::models::subscription::{Plan, STATUS_ACTIVE};
use crate::utils::password;

use super::{NewExam, NewQuestion, NewSubscription, NewUser, Repos};

/// The static subscription plan catalog.
pub fn plan_catalog() -> Vec<Plan> {
    vec![
        Plan {
            id: "mensal".to_string(),
            title: "Mensal".to_string(),
            price: 49,
            period: "mensal".to_string(),
            description: "Acesso a todos os recursos por um mês".to_string(),
            features: vec![
                "Acesso a todos os simulados".to_string(),
                "Estatísticas básicas".to_string(),
                "Suporte por email".to_string(),
                "Acesso a materiais de estudo".to_string(),
            ],
            recommended: false,
        },
        Plan {
            id: "trimestral".to_string(),
            title: "Trimestral".to_string(),
            price: 129,
            period: "trimestral".to_string(),
            description: "Acesso a todos os recursos por três meses".to_string(),
            features: vec![
                "Acesso a todos os simulados".to_string(),
                "Estatísticas avançadas".to_string(),
                "Suporte prioritário".to_string(),
                "Acesso a materiais de estudo".to_string(),
                "Mapas mentais exclusivos".to_string(),
            ],
            recommended: true,
        },
        Plan {
            id: "anual".to_string(),
            title: "Anual".to_string(),
            price: 399,
            period: "anual".to_string(),
            description: "Acesso a todos os recursos por um ano".to_string(),
            features: vec![
                "Acesso a todos os simulados".to_string(),
                "Estatísticas avançadas".to_string(),
                "Suporte prioritário 24/7".to_string(),
                "Acesso a materiais de estudo".to_string(),
                "Mapas mentais exclusivos".to_string(),
                "Simulados personalizados".to_string(),
                "Acesso a aulas ao vivo".to_string(),
            ],
            recommended: false,
        },
    ]
}

/// Seeds the demo user, the mock exams and one active subscription.
pub async fn load_demo_data(repos: &Repos) -> Result<(), AppError> {
    let user = repos
        .users
        .create(NewUser {
            name: "João Silva".to_string(),
            email: "joao@exemplo.com".to_string(),
            password: password::hash("123456")?,
            role: "user".to_string(),
        })
        .await?;

    repos.exams.create(full_mock_exam()).await;
    repos.exams.create(portuguese_mock_exam()).await;

    let start = chrono::Utc.with_ymd_and_hms(2025, 4, 15, 0, 0, 0).unwrap();
    let end = chrono::Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap();
    repos
        .subscriptions
        .create(NewSubscription {
            user_id: user.id,
            plan_id: "trimestral".to_string(),
            status: STATUS_ACTIVE.to_string(),
            start_date: start,
            end_date: end,
            amount_paid: 129,
            payment_method: "Cartão de crédito terminado em 1234".to_string(),
        })
        .await;

    tracing::info!("Demo data seeded (user: {})", user.email);
    Ok(())
}

fn full_mock_exam() -> NewExam {
    NewExam {
        title: "Simulado Completo".to_string(),
        description: "Simulado com questões de todas as matérias".to_string(),
        subjects: vec![
            "Direito Constitucional".to_string(),
            "Direito Administrativo".to_string(),
            "Português".to_string(),
            "Raciocínio Lógico".to_string(),
        ],
        duration_secs: 3600,
        questions: vec![
            NewQuestion {
                text: "De acordo com a Constituição Federal, são direitos sociais, EXCETO:"
                    .to_string(),
                options: vec![
                    "Educação e saúde".to_string(),
                    "Alimentação e trabalho".to_string(),
                    "Propriedade privada".to_string(),
                    "Moradia e transporte".to_string(),
                    "Lazer e segurança".to_string(),
                ],
                correct_option: 2,
                subject: "Direito Constitucional".to_string(),
                explanation: "A propriedade privada é um direito individual, previsto no art. 5º, \
                              XXII, da CF/88, e não um direito social. Os direitos sociais estão \
                              previstos no art. 6º da CF/88."
                    .to_string(),
            },
            NewQuestion {
                text: "Sobre os princípios da Administração Pública, é correto afirmar que:"
                    .to_string(),
                options: vec![
                    "O princípio da legalidade permite ao administrador público fazer tudo \
                     aquilo que a lei não proíbe"
                        .to_string(),
                    "O princípio da impessoalidade impede a promoção pessoal de autoridades \
                     ou servidores públicos"
                        .to_string(),
                    "O princípio da moralidade não possui aplicação prática, sendo apenas \
                     uma diretriz teórica"
                        .to_string(),
                    "O princípio da publicidade é absoluto, não comportando exceções".to_string(),
                    "O princípio da eficiência foi revogado pela Emenda Constitucional nº 45/2004"
                        .to_string(),
                ],
                correct_option: 1,
                subject: "Direito Administrativo".to_string(),
                explanation: "O princípio da impessoalidade impede a promoção pessoal de \
                              autoridades ou servidores públicos, conforme previsto no art. 37, \
                              §1º, da CF/88."
                    .to_string(),
            },
        ],
    }
}

fn portuguese_mock_exam() -> NewExam {
    NewExam {
        title: "Simulado de Português".to_string(),
        description: "Questões de língua portuguesa e raciocínio lógico".to_string(),
        subjects: vec!["Português".to_string(), "Raciocínio Lógico".to_string()],
        duration_secs: 1800,
        questions: vec![
            NewQuestion {
                text: "Assinale a alternativa correta quanto à concordância verbal:".to_string(),
                options: vec![
                    "Fazem dez anos que estudo para concursos".to_string(),
                    "Faz dez anos que estudo para concursos".to_string(),
                    "Houveram muitos candidatos aprovados".to_string(),
                    "Existe muitos candidatos inscritos".to_string(),
                    "Haviam dúvidas sobre o edital".to_string(),
                ],
                correct_option: 1,
                subject: "Português".to_string(),
                explanation: "O verbo 'fazer' indicando tempo decorrido é impessoal e permanece \
                              na terceira pessoa do singular."
                    .to_string(),
            },
            NewQuestion {
                text: "Sobre o uso da crase, é correto afirmar que:".to_string(),
                options: vec![
                    "Usa-se crase antes de palavras masculinas".to_string(),
                    "A crase é obrigatória antes de verbos".to_string(),
                    "A crase resulta da fusão da preposição 'a' com o artigo definido 'a'"
                        .to_string(),
                    "A crase nunca ocorre em locuções adverbiais".to_string(),
                    "Crase e acento agudo são equivalentes".to_string(),
                ],
                correct_option: 2,
                subject: "Português".to_string(),
                explanation: "A crase indica a fusão da preposição 'a' com o artigo definido \
                              feminino 'a', como em 'ir à escola'."
                    .to_string(),
            },
            NewQuestion {
                text: "Se todo A é B e algum B é C, então:".to_string(),
                options: vec![
                    "Todo A é C".to_string(),
                    "Algum A é necessariamente C".to_string(),
                    "Nada se pode concluir sobre a relação entre A e C".to_string(),
                    "Nenhum A é C".to_string(),
                    "Todo C é A".to_string(),
                ],
                correct_option: 2,
                subject: "Raciocínio Lógico".to_string(),
                explanation: "Das premissas 'todo A é B' e 'algum B é C' não decorre \
                              necessariamente nenhuma relação entre A e C."
                    .to_string(),
            },
        ],
    }
}
