//! The built-in scheme for the 2024 quality-of-life survey.

use svy_model::CategoryDescriptor;

use crate::rules::{CategoryRule, Matcher, Taxonomy};

impl Taxonomy {
    /// The seventeen-category scheme of the 2024 survey wave.
    ///
    /// Question identifiers follow the questionnaire layout: `Q_<n>` for
    /// single-coded items, `T_Q_<n>_<m>` for grid rows, and bare names
    /// such as `SEXO` or `FACTOR` for interview-control fields.
    pub fn survey_2024() -> Taxonomy {
        Taxonomy::from_validated_parts(categories_2024(), rules_2024())
    }
}

fn categories_2024() -> Vec<CategoryDescriptor> {
    vec![
        CategoryDescriptor::new(
            1,
            "Life Satisfaction",
            "Satisfaction with life, happiness, and personal relationships",
        ),
        CategoryDescriptor::new(
            2,
            "Family and Household Relations",
            "Family dynamics and the division of household tasks",
        ),
        CategoryDescriptor::new(
            3,
            "Economic Situation",
            "Economic satisfaction, income, and employment",
        ),
        CategoryDescriptor::new(
            4,
            "Health",
            "Access to health services and physical and mental wellbeing",
        ),
        CategoryDescriptor::new(
            5,
            "Education and Leisure",
            "Satisfaction with education and use of free time",
        ),
        CategoryDescriptor::new(
            6,
            "Housing and Public Services",
            "Housing, public services, and neighborhood spaces",
        ),
        CategoryDescriptor::new(
            7,
            "Mobility and Transport",
            "Means of transport, commute times, and public transit",
        ),
        CategoryDescriptor::new(
            8,
            "Road Safety",
            "Driving behavior, accidents, and road safety",
        ),
        CategoryDescriptor::new(
            9,
            "Public Safety",
            "Perceived safety, victimization, and crime",
        ),
        CategoryDescriptor::new(
            10,
            "Violence and Harassment",
            "Experiences of violence, aggression, and harassment",
        ),
        CategoryDescriptor::new(
            11,
            "Environment",
            "Air and water quality and the urban surroundings",
        ),
        CategoryDescriptor::new(
            12,
            "Civic Participation",
            "Organization membership and forms of participation",
        ),
        CategoryDescriptor::new(
            13,
            "Equality and Discrimination",
            "Perceived equality and experiences of discrimination",
        ),
        CategoryDescriptor::new(
            14,
            "Politics and Institutional Trust",
            "Political interest, news media, and trust in institutions",
        ),
        CategoryDescriptor::new(
            15,
            "Sociodemographics",
            "Respondent background: gender, age, schooling, occupation",
        ),
        CategoryDescriptor::new(
            16,
            "Household Characteristics",
            "Dwelling, amenities, and household composition",
        ),
        CategoryDescriptor::new(
            17,
            "Survey Control",
            "Identification, location, and interview control data",
        ),
    ]
}

fn rules_2024() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(Matcher::index_range("Q_", 1, 11), 1),
        CategoryRule::new(Matcher::index_range("T_Q_", 12, 13), 2),
        CategoryRule::new(Matcher::index_range("Q_", 14, 21), 3),
        CategoryRule::new(Matcher::index_range("Q_", 22, 24), 4),
        CategoryRule::new(Matcher::index_range("T_Q_", 25, 30), 4),
        CategoryRule::new(Matcher::index_range("Q_", 31, 31), 4),
        CategoryRule::new(Matcher::index_range("Q_", 32, 34), 5),
        CategoryRule::new(Matcher::index_range("Q_", 35, 35), 6),
        CategoryRule::new(Matcher::index_range("T_Q_", 36, 37), 6),
        CategoryRule::new(Matcher::index_range("Q_", 38, 42), 7),
        CategoryRule::new(Matcher::index_range("T_Q_", 39, 39), 7),
        CategoryRule::new(Matcher::index_range("T_Q_", 43, 43), 7),
        CategoryRule::new(Matcher::index_range("Q_", 44, 48), 8),
        CategoryRule::new(Matcher::index_range("Q_", 49, 57), 9),
        CategoryRule::new(Matcher::index_range("T_Q_", 58, 59), 10),
        CategoryRule::new(Matcher::index_range("T_Q_", 60, 60), 11),
        CategoryRule::new(Matcher::index_range("T_Q_", 61, 61), 12),
        CategoryRule::new(Matcher::index_range("T_Q_", 66, 66), 12),
        CategoryRule::new(Matcher::index_range("Q_", 67, 67), 12),
        CategoryRule::new(Matcher::index_range("Q_", 62, 62), 13),
        CategoryRule::new(Matcher::index_range("T_Q_", 63, 63), 13),
        CategoryRule::new(Matcher::index_range("T_Q_", 68, 68), 13),
        CategoryRule::new(Matcher::index_range("T_Q_", 64, 65), 14),
        CategoryRule::new(Matcher::index_range("Q_", 69, 71), 14),
        CategoryRule::new(Matcher::index_range("T_Q_", 72, 73), 14),
        CategoryRule::new(Matcher::index_range("Q_", 74, 79), 15),
        CategoryRule::new(Matcher::index_range("T_Q_", 80, 80), 16),
        CategoryRule::new(Matcher::index_range("Q_", 81, 90), 16),
        CategoryRule::new(Matcher::index_range("T_Q_", 83, 84), 16),
        CategoryRule::new(Matcher::index_range("Q_", 91, 98), 17),
        CategoryRule::new(Matcher::index_range("T_Q_", 92, 92), 17),
        CategoryRule::new(Matcher::index_range("T_Q_", 98, 98), 17),
        CategoryRule::new(
            Matcher::exact([
                "SbjNum",
                "Date",
                "Duration",
                "SEXO",
                "CALIDAD_VIDA",
                "EDAD",
                "ESC",
                "IND_SE2024",
                "NSE2024",
                "NSE2024_C",
                "FACTOR",
            ]),
            17,
        ),
    ]
}
