//! Board layers
//!
//! The fixed set of layers a drawing command may target. Names follow the
//! KiCad scripting identifiers (`F_Cu`, `B_SilkS`, `Edge_Cuts`, ...).

use crate::error::ConfigurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! board_layers {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Board layer identifier
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BoardLayer {
            $($variant,)+
        }

        impl BoardLayer {
            /// Every known layer, copper layers first
            pub const ALL: &'static [BoardLayer] = &[$(BoardLayer::$variant,)+];

            /// Layer name as used by scripts
            pub fn name(self) -> &'static str {
                match self {
                    $(BoardLayer::$variant => $name,)+
                }
            }
        }

        impl FromStr for BoardLayer {
            type Err = ConfigurationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(BoardLayer::$variant),)+
                    _ => Err(ConfigurationError::UnknownLayer {
                        name: s.to_string(),
                    }),
                }
            }
        }
    };
}

board_layers! {
    FCu => "F_Cu",
    In1Cu => "In1_Cu",
    In2Cu => "In2_Cu",
    In3Cu => "In3_Cu",
    In4Cu => "In4_Cu",
    In5Cu => "In5_Cu",
    In6Cu => "In6_Cu",
    In7Cu => "In7_Cu",
    In8Cu => "In8_Cu",
    In9Cu => "In9_Cu",
    In10Cu => "In10_Cu",
    In11Cu => "In11_Cu",
    In12Cu => "In12_Cu",
    In13Cu => "In13_Cu",
    In14Cu => "In14_Cu",
    In15Cu => "In15_Cu",
    In16Cu => "In16_Cu",
    In17Cu => "In17_Cu",
    In18Cu => "In18_Cu",
    In19Cu => "In19_Cu",
    In20Cu => "In20_Cu",
    In21Cu => "In21_Cu",
    In22Cu => "In22_Cu",
    In23Cu => "In23_Cu",
    In24Cu => "In24_Cu",
    In25Cu => "In25_Cu",
    In26Cu => "In26_Cu",
    In27Cu => "In27_Cu",
    In28Cu => "In28_Cu",
    In29Cu => "In29_Cu",
    In30Cu => "In30_Cu",
    BCu => "B_Cu",
    BAdhes => "B_Adhes",
    FAdhes => "F_Adhes",
    BPaste => "B_Paste",
    FPaste => "F_Paste",
    BSilkS => "B_SilkS",
    FSilkS => "F_SilkS",
    BMask => "B_Mask",
    FMask => "F_Mask",
    DwgsUser => "Dwgs_User",
    CmtsUser => "Cmts_User",
    Eco1User => "Eco1_User",
    Eco2User => "Eco2_User",
    EdgeCuts => "Edge_Cuts",
    Margin => "Margin",
    BCrtYd => "B_CrtYd",
    FCrtYd => "F_CrtYd",
    BFab => "B_Fab",
    FFab => "F_Fab",
    User1 => "User_1",
    User2 => "User_2",
    User3 => "User_3",
    User4 => "User_4",
    User5 => "User_5",
    User6 => "User_6",
    User7 => "User_7",
    User8 => "User_8",
    User9 => "User_9",
    Rescue => "Rescue",
}

impl BoardLayer {
    /// Check if this is a copper (conductive) layer
    pub fn is_copper(self) -> bool {
        self.name().ends_with("_Cu")
    }
}

impl Default for BoardLayer {
    fn default() -> Self {
        Self::FCu
    }
}

impl fmt::Display for BoardLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BoardLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BoardLayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
