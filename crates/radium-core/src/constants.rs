//! Protocol constants for checkpoint enforcement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network type: Mainnet or Testnet.
///
/// Selects which compiled-in checkpoint table is consulted.
///
/// # Examples
///
/// ```
/// use radium_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert_eq!("testnet".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network. Carries no checkpoints.
    Testnet,
}

impl NetworkType {
    /// Lowercase name, as accepted by [`FromStr`] and the config layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Compiled-in `(height, hex hash)` checkpoint constants for this network.
    pub fn checkpoints(&self) -> &'static [(u64, &'static str)] {
        match self {
            Self::Mainnet => MAINNET_CHECKPOINTS,
            Self::Testnet => TESTNET_CHECKPOINTS,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

/// Maturity window for automatic sync-checkpoint selection, in blocks.
///
/// The sync checkpoint sits exactly this many blocks behind the chain tip
/// (or at genesis for shorter chains). Reorganizations at or below it are
/// refused.
pub const CHECKPOINT_SPAN: u64 = 500;

/// Hard-coded mainnet checkpoints: `(height, block_hash)` pairs.
///
/// Hashes are written in display order. Heights must be strictly
/// increasing; the table is validated when a checkpoint registry is built.
pub const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (0, "000000770c6aea829bb1ace7b06497f71799a6358e0e292740c4f9443a17bfb6"), // genesis
    (2879, "675ebb9f0f934c35bbf1955565482601ef68977b2fef8248689626004fcbce2d"), // last PoW block
    (2880, "3818386bc9fced59f21d5a9d1eab8a532c85efecb831eceee995ae1a7dc90419"), // first PoS block
    (100000, "97b8764441d1d0eff98e834cc743ec4cd6779d53f149dec9403c9758370abd8c"),
    (200000, "98b0bcf0218293549a30d938a1d641b6bc6b498361cb432e3fafd6935c592846"),
    (300000, "dcb25c38e2731a68d5bfa16b00b8479fed57c6a352cfd94d8e0dfdd690ac9ea2"),
    (440000, "88914855018cf647d1b20162eed2dbc7cdf69757f8216868c1b55687aafe1a75"),
    (500000, "41950e8d38381ce56fc0fd9eca76e73b49ce256c01ab2521897c5c6285b39c8d"),
    (550000, "8a39262d43135792a429a4e2a6deeb669c88b618ecfa3ca855edaf1e4c3631af"),
    (600000, "23141467be3b6fe23419c8a9fbcd4df431b4b1abcd43a1fa689e7b6d137e89ef"),
    (619480, "17895abf56169141d553891d00a4c46d37023250a0089800e389bfba37e91f9a"), // avg_fee activation
    (625249, "677def44b35e162452fb12f00c4e4fa5f1339a90a4b82753266e1cd9f5b359e7"),
    (626372, "977494d951029df80bee05bdd461e6e767c916c2b60ebd356133c38ae5cf5823"),
    (626555, "ab4e8bdd76283070e11377f9497d7a644d9a813fc354152b36ded76d68eb5388"), // avg_fee revert
    (655200, "0dbcd2799042832cb3c1c0255e34b1ca797d30db9438d836e9e830394e98b999"),
    (700000, "6ceebeff2760988638367e5e91a9061bdc9623db1dceeaa7cef1eb8da88ec2bd"),
    (750000, "a865bc03e1ce183173b2892e1ed7422e92e6f6cc71f5da5b45db7c346d557960"),
    (800000, "bce932a50e264133d5456f1a8076552f5186f3f6ff46310f4c769ae83c4a1723"),
    (850000, "b29d546f1d8d57fbaef9ef2f40b107107ad5b124ed90f01556650ab9191e42c1"),
    (900000, "5c58c0b472ab44dbde75c31e549615fc00feea3a93844d8c78837b2e85245c4e"),
    (950000, "75ece61af3a0bf5243ff0a7773a8f2bb560f52ba6aa2652f0de1ce3c1199ede8"),
    (1000000, "6950e1ca2bef4adfb963df7edaf92cac8127d3445554d23738bd88c135ce59e4"),
    (1050000, "104c2d6ffa918160fb3878f89323920d037f857854782c0436a5df4be42e0492"),
    (1100000, "0978eceb49ed5dc681c766b5cba395b5008d8dbadba81f37e86fdeff61fc38d5"),
    (1150000, "12c172f98f5c491f5f230bef5040a50c4ddf8526c5160b419a708564dd1ec0c9"),
    (1200000, "619ffe5e099a182afaf5c37b0c73e60fd858acb2231ee29d95f4a223ba6e429a"),
    (1250000, "12cd34ed7b24ecf5414fdf175b72fbf30db043cf51b53d4efa79a5272e91ab9d"),
    (1300000, "493d0c754b68a09f0c22bea134264aceebc8acc13c02a80bd57632876b54e2f6"),
];

/// Testnet has no checkpoints.
pub const TESTNET_CHECKPOINTS: &[(u64, &str)] = &[];
