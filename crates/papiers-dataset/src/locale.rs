// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Name and place tables for the supported issuing countries.

use papiers_core::{Country, Sex};

/// Word lists the identity faker draws from.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    pub male_given: &'static [&'static str],
    pub female_given: &'static [&'static str],
    pub surnames: &'static [&'static str],
    pub cities: &'static [&'static str],
}

impl Locale {
    pub fn for_country(country: Country) -> &'static Self {
        match country {
            Country::Benin => &BENIN,
            Country::IvoryCoast => &IVORY_COAST,
        }
    }

    pub fn given_names(&self, sex: Sex) -> &'static [&'static str] {
        match sex {
            Sex::Male => self.male_given,
            Sex::Female => self.female_given,
            Sex::Unspecified => self.female_given,
        }
    }
}

// Fon, Yoruba, Bariba, and French names common in Benin.
static BENIN: Locale = Locale {
    male_given: &[
        "Koffi", "Codjo", "Kossi", "Sènan", "Dossa", "Mawuli", "Agossou", "Sèdjro", "Gildas",
        "Romuald", "Jean-Baptiste", "Aimé", "Olatoundji", "Adébayo", "Babatundé", "Soulé",
        "Orou", "Bio", "Sabi", "Florent", "Christian", "Serge", "Hermann", "Arnaud",
    ],
    female_given: &[
        "Adjoa", "Akouavi", "Sèna", "Mahougnon", "Houefa", "Ablawa", "Yétondé", "Folakè",
        "Adéola", "Bintou", "Gnon", "Mariam", "Chantal", "Bénédicte", "Marie-Claire", "Prisca",
        "Reine", "Nadège", "Eyram", "Fifamè", "Gisèle", "Sandrine", "Rachidatou", "Afiavi",
    ],
    surnames: &[
        "Adjovi", "Agossou", "Houngbédji", "Dossou", "Zinsou", "Akpovi", "Gbaguidi",
        "Hounkpatin", "Adékambi", "Ahouandjinou", "Hounsou", "Tossou", "Kiki", "Sossa",
        "Dossou-Yovo", "Ahossi", "Amoussou", "Assogba", "Bello", "Chabi", "Orou Guiwa",
        "Sanni", "Soglo", "Talon", "Yayi", "Azonhiho", "de Souza", "Gnonlonfoun",
    ],
    cities: &[
        "Cotonou", "Porto-Novo", "Parakou", "Abomey-Calavi", "Djougou", "Bohicon",
        "Natitingou", "Ouidah", "Lokossa", "Kandi", "Abomey", "Savalou", "Malanville",
        "Nikki", "Dassa-Zoumé", "Pobè", "Allada", "Sèmè-Kpodji",
    ],
};

// Akan, Mandé, Kru, and French names common in Côte d'Ivoire.
static IVORY_COAST: Locale = Locale {
    male_given: &[
        "Kouassi", "Kouadio", "Kouamé", "Konan", "Yao", "Koffi", "Kouakou", "Moussa",
        "Seydou", "Drissa", "Lacina", "Bakary", "Souleymane", "Didier", "Serge", "Hervé",
        "Jean-Marc", "Arsène", "Blé", "Gnahoré", "Wilfried", "Fabrice", "Ange", "Aboubacar",
    ],
    female_given: &[
        "Aya", "Adjoua", "Affoué", "Amenan", "Akissi", "Ahou", "Amoin", "Amlan", "Mariam",
        "Fatoumata", "Awa", "Aminata", "Nafissatou", "Rokia", "Clémentine", "Marie-Laure",
        "Edwige", "Prisca", "Christelle", "Estelle", "Yasmine", "Odette", "Salimata", "Tata",
    ],
    surnames: &[
        "Kouassi", "Konan", "Yao", "Koné", "Ouattara", "Traoré", "Bamba", "Coulibaly",
        "Diabaté", "Kouamé", "N'Guessan", "Aka", "Gbagbo", "Bédié", "Touré", "Cissé",
        "Fofana", "Diomandé", "Sangaré", "Yapi", "Kacou", "Assi", "Ehui", "Gnagne", "Zadi",
        "Dje Bi", "Kra", "N'Dri",
    ],
    cities: &[
        "Abidjan", "Bouaké", "Daloa", "Yamoussoukro", "San-Pédro", "Korhogo", "Man", "Gagnoa",
        "Divo", "Abengourou", "Anyama", "Soubré", "Séguéla", "Odienné", "Grand-Bassam",
        "Bondoukou", "Dabou", "Agboville",
    ],
};
