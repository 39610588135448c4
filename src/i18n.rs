//! UI strings per interface language.
//!
//! English covers every key. Other locales translate a subset; a key they
//! lack renders as the key's own name.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    Home,
    Results,
    Info,
    PracticePairs,
    PlayAudio,
    Total,
    WeightedAverage,
    TimePracticed,
    Min,
    AccuracyTrend,
    AverageByPair,
}

impl TranslationKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationKey::Home => "home",
            TranslationKey::Results => "results",
            TranslationKey::Info => "info",
            TranslationKey::PracticePairs => "practicePairs",
            TranslationKey::PlayAudio => "playAudio",
            TranslationKey::Total => "total",
            TranslationKey::WeightedAverage => "weightedAverage",
            TranslationKey::TimePracticed => "timePracticed",
            TranslationKey::Min => "min",
            TranslationKey::AccuracyTrend => "accuracyTrend",
            TranslationKey::AverageByPair => "averageByPair",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    English,
    Japanese,
    Mandarin,
    Thai,
    Spanish,
    Arabic,
    Russian,
    Korean,
    Portuguese,
    Turkish,
}

impl Locale {
    pub const ALL: [Locale; 10] = [
        Locale::English,
        Locale::Japanese,
        Locale::Mandarin,
        Locale::Thai,
        Locale::Spanish,
        Locale::Arabic,
        Locale::Russian,
        Locale::Korean,
        Locale::Portuguese,
        Locale::Turkish,
    ];

    /// Name of the language in its own script, as shown in the picker.
    pub fn label(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Japanese => "日本語",
            Locale::Mandarin => "中文",
            Locale::Thai => "ภาษาไทย",
            Locale::Spanish => "idioma español",
            Locale::Arabic => "اللغة العربية",
            Locale::Russian => "русский язык",
            Locale::Korean => "한국어",
            Locale::Portuguese => "Português",
            Locale::Turkish => "Türkçe",
        }
    }

    pub fn from_label(label: &str) -> Option<Locale> {
        Locale::ALL.into_iter().find(|l| l.label() == label)
    }
}

fn english(key: TranslationKey) -> &'static str {
    match key {
        TranslationKey::Home => "Home",
        TranslationKey::Results => "Results",
        TranslationKey::Info => "Info",
        TranslationKey::PracticePairs => "Practice Pairs",
        TranslationKey::PlayAudio => "Play Audio",
        TranslationKey::Total => "Total",
        TranslationKey::WeightedAverage => "Weighted Average",
        TranslationKey::TimePracticed => "Time Practiced",
        TranslationKey::Min => "min",
        TranslationKey::AccuracyTrend => "Accuracy Trend",
        TranslationKey::AverageByPair => "Average by Pair",
    }
}

/// (home, results, practicePairs, averageByPair)
fn core_strings(locale: Locale) -> Option<[&'static str; 4]> {
    let strings = match locale {
        Locale::English => return None,
        Locale::Japanese => ["ホーム", "結果", "練習ペア", "ペア別平均"],
        Locale::Mandarin => ["首页", "结果", "练习对", "每对平均"],
        Locale::Thai => ["หน้าแรก", "ผลลัพธ์", "คู่ฝึก", "เฉลี่ยต่อคู่"],
        Locale::Spanish => ["Inicio", "Resultados", "Parejas de práctica", "Promedio por pareja"],
        Locale::Arabic => ["الرئيسية", "النتائج", "أزواج التدريب", "متوسط الزوج"],
        Locale::Russian => ["Главная", "Результаты", "Пары для практики", "Среднее по парам"],
        Locale::Korean => ["홈", "결과", "연습 쌍", "쌍별 평균"],
        Locale::Portuguese => ["Início", "Resultados", "Pares de prática", "Média por par"],
        Locale::Turkish => ["Ana Sayfa", "Sonuçlar", "Alıştırma Çiftleri", "Çifte Göre Ortalama"],
    };
    Some(strings)
}

fn lookup(locale: Locale, key: TranslationKey) -> Option<&'static str> {
    let Some([home, results, practice_pairs, average_by_pair]) = core_strings(locale) else {
        return Some(english(key));
    };
    match key {
        TranslationKey::Home => Some(home),
        TranslationKey::Results => Some(results),
        TranslationKey::PracticePairs => Some(practice_pairs),
        TranslationKey::AverageByPair => Some(average_by_pair),
        _ => None,
    }
}

/// Localized string, or the key's own name when the locale lacks it.
pub fn translate(locale: Locale, key: TranslationKey) -> &'static str {
    lookup(locale, key).unwrap_or_else(|| key.as_str())
}
