// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("ark_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 15;

pub const RECRUITMENT_URL: &str =
    "https://raw.githubusercontent.com/Aceship/AN-EN-Tags/master/json/tl-akhr.json";
pub const CHARACTER_TABLE_URL: &str =
    "https://raw.githubusercontent.com/Aceship/AN-EN-Tags/master/json/gamedata/en_US/gamedata/excel/character_table.json";
pub const SKILL_TABLE_URL: &str =
    "https://raw.githubusercontent.com/Aceship/AN-EN-Tags/master/json/gamedata/en_US/gamedata/excel/skill_table.json";
pub const BUILDING_DATA_URL: &str =
    "https://raw.githubusercontent.com/Aceship/AN-EN-Tags/master/json/gamedata/en_US/gamedata/excel/building_data.json";
pub const GAMEPRESS_URL: &str = "https://gamepress.gg/arknights/";

// Local store
pub const STORE_DIR: &str = ".store";
pub const SHORTCUTS_FILE: &str = "shortcuts.csv";
pub const LOG_FILE: &str = "debug.log";
pub const STORE_SEP: char = ',';
pub const CONFIG_FILE: &str = "ark.toml";

// Recruitment
pub const EXEMPT_ALIAS: &str = "top-operator";
pub const TOP_RARITY: u8 = 6;
pub const MAX_COMBO_LEN: usize = 3;
pub const SIZE_PENALTY: i32 = 3;
pub const BENEFICIAL_THRESHOLD: u8 = 3;
pub const LABEL_DELIM: &str = " + ";
pub const DEFAULT_WEIGHTS: [(u8, i32); 6] = [(1, 0), (2, -2), (3, 0), (4, 1), (5, 2), (6, 3)];
