//! Screens and the selection tables that move between them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    MainMenu,
    Recipes,
    Water,
    Weight,
    Bmi,
    Exit,
}

pub(crate) const MAIN_MENU: &[&str] = &[
    "Budget based recipe suggestions",
    "Water intake tracker",
    "Weight tracker",
    "BMI calculator",
    "Exit",
];

impl Screen {
    pub(crate) fn from_main_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(Screen::Recipes),
            2 => Some(Screen::Water),
            3 => Some(Screen::Weight),
            4 => Some(Screen::Bmi),
            5 => Some(Screen::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaterAction {
    Log,
    TodayTotal,
    TotalForDate,
    Back,
}

pub(crate) const WATER_MENU: &[&str] = &[
    "Log water intake",
    "Show today's total",
    "Show total for a date",
    "Back to main menu",
];

impl WaterAction {
    pub(crate) fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(WaterAction::Log),
            2 => Some(WaterAction::TodayTotal),
            3 => Some(WaterAction::TotalForDate),
            4 => Some(WaterAction::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WeightAction {
    Add,
    History,
    Progress,
    Back,
}

pub(crate) const WEIGHT_MENU: &[&str] = &[
    "Add weight entry",
    "View weight history",
    "Show progress report",
    "Back to main menu",
];

impl WeightAction {
    pub(crate) fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(WeightAction::Add),
            2 => Some(WeightAction::History),
            3 => Some(WeightAction::Progress),
            4 => Some(WeightAction::Back),
            _ => None,
        }
    }
}
