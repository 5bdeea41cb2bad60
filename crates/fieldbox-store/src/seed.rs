//! Fixed seed data applied at process start.
//!
//! In a production deployment this would come from an API or a config file
//! mapping Box folder IDs; the portal currently ships with the curated
//! maintenance-document set below and a single administrator account.

use chrono::NaiveDate;

use fieldbox_core::{Account, Document, EquipmentCategory, Role};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

#[allow(clippy::too_many_arguments)]
fn doc(
    id: &str,
    title: &str,
    category: EquipmentCategory,
    manufacturer: &str,
    model_series: &str,
    last_updated: NaiveDate,
    box_link: &str,
    is_favorite: bool,
    tags: &[&str],
    description: Option<&str>,
) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        category,
        manufacturer: manufacturer.to_string(),
        model_series: model_series.to_string(),
        box_link: box_link.to_string(),
        last_updated,
        is_favorite,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: description.map(str::to_string),
    }
}

/// The seeded account set: exactly one administrator.
pub fn seed_accounts() -> Vec<Account> {
    vec![Account {
        id: "admin-feng-dou".to_string(),
        name: "Feng Dou".to_string(),
        email: "feng.dou@dcsstech.com".to_string(),
        password: "Doufeng1983".to_string(),
        role: Role::Admin,
    }]
}

/// The seeded maintenance-document catalog.
pub fn seed_documents() -> Vec<Document> {
    use EquipmentCategory::*;

    vec![
        // ── Servers (HPE, Dell, Fujitsu, Lenovo, Oracle, Nutanix) ──────────
        doc(
            "hpe-dl380-g10-hdd",
            "HPE ProLiant DL380 Gen10 - HDD交換手順書",
            Server,
            "HPE",
            "ProLiant DL Gen10",
            date(2024, 3, 10),
            "#box-dl380-hdd",
            true,
            &["HDD", "Maintenance", "Replacement"],
            Some("ホットスワップ対応HDDの物理交換およびSmart Storage Administratorでの確認手順。"),
        ),
        doc(
            "hpe-dl360-g10-fan",
            "HPE ProLiant DL360 Gen10 - ファンモジュール交換",
            Server,
            "HPE",
            "ProLiant DL Gen10",
            date(2023, 11, 5),
            "#box-dl360-fan",
            false,
            &["Fan", "Cooling", "Replacement"],
            None,
        ),
        doc(
            "hpe-ilo5-fw-update",
            "HPE iLO 5 - ファームウェアアップデート手順",
            Server,
            "HPE",
            "ProLiant Gen10/Gen10+",
            date(2024, 5, 12),
            "#box-ilo5-fw",
            true,
            &["Firmware", "iLO", "Upgrade"],
            Some("Web管理画面経由およびSUMを使用したファームウェア更新のステップバイステップガイド。"),
        ),
        doc(
            "dell-r640-dimm",
            "Dell EMC PowerEdge R640 - メモリ(DIMM)増設・交換手順",
            Server,
            "Dell",
            "PowerEdge 14G",
            date(2024, 1, 20),
            "#box-r640-dimm",
            false,
            &["Memory", "Upgrade", "Replacement"],
            None,
        ),
        doc(
            "dell-idrac-logs",
            "Dell iDRAC9 - TSRログ取得手順",
            Server,
            "Dell",
            "General",
            date(2024, 4, 1),
            "#box-idrac-tsr",
            true,
            &["Logs", "Troubleshooting", "iDRAC"],
            None,
        ),
        doc(
            "fujitsu-rx2540-m5-sysboard",
            "Fujitsu PRIMERGY RX2540 M5 - システムボード交換手順",
            Server,
            "Fujitsu",
            "PRIMERGY RX M5",
            date(2023, 8, 15),
            "#box-rx2540-sysboard",
            false,
            &["Motherboard", "Replacement", "Heavy Maintenance"],
            Some("システムボード交換後のシャーシID設定およびBIOSリカバリ手順を含む詳細マニュアル。"),
        ),
        doc(
            "lenovo-sr650-raid",
            "Lenovo ThinkSystem SR650 - RAID構成ガイド (XClarity)",
            Server,
            "Lenovo",
            "ThinkSystem SR",
            date(2023, 12, 1),
            "#box-sr650-raid",
            false,
            &["RAID", "Config", "XClarity"],
            None,
        ),
        doc(
            "oracle-t8-dimm",
            "Oracle SPARC T8-1 - DIMM交換手順",
            Server,
            "Oracle",
            "SPARC T8",
            date(2023, 5, 10),
            "#box-oracle-dimm",
            false,
            &["Solaris", "Hardware", "Memory"],
            None,
        ),
        doc(
            "nutanix-nx-node",
            "Nutanix NX-3060-G7 - ノード交換手順",
            Server,
            "Nutanix",
            "NX G7",
            date(2024, 3, 1),
            "#box-nutanix-node",
            false,
            &["HCI", "Maintenance", "CVM", "Replacement"],
            Some("CVMの停止手順から物理交換、クラスターへの再参加・修復手順まで。"),
        ),
        // ── Storage (NetApp, Dell EMC, Pure, HPE) ──────────────────────────
        doc(
            "netapp-aff-controller",
            "NetApp AFF A220 - コントローラーフェイルオーバー手順",
            Storage,
            "NetApp",
            "AFF Series",
            date(2023, 12, 15),
            "#box-netapp-fo",
            true,
            &["Controller", "HA", "Ontap"],
            Some("メンテナンス時のテイクオーバーおよびギブバック操作コマンド詳細。"),
        ),
        doc(
            "netapp-disk-assign",
            "NetApp ONTAP - ディスクオーナーシップ変更手順",
            Storage,
            "NetApp",
            "General",
            date(2023, 9, 20),
            "#box-netapp-disk",
            false,
            &["Disk", "Ontap", "Configuration"],
            None,
        ),
        doc(
            "emc-unity-sp-reboot",
            "Dell EMC Unity - SP再起動手順 (Service Mode)",
            Storage,
            "Dell EMC",
            "Unity",
            date(2024, 1, 15),
            "#box-unity-sp",
            false,
            &["SP", "Reboot", "Maintenance"],
            None,
        ),
        doc(
            "emc-isilon-node-replace",
            "Dell EMC Isilon Gen6 - ノード交換手順",
            Storage,
            "Dell EMC",
            "Isilon / PowerScale",
            date(2024, 2, 10),
            "#box-isilon-node",
            false,
            &["Node", "Replacement", "Smartfail"],
            Some("Smartfailプロセスおよび物理交換、新規ノードのクラスタ参加手順。"),
        ),
        doc(
            "pure-flasharray-module",
            "Pure Storage FlashArray //X - Flashモジュール交換",
            Storage,
            "Pure Storage",
            "FlashArray //X",
            date(2024, 4, 20),
            "#box-pure-flash",
            true,
            &["Flash", "Replacement", "Purity"],
            Some("Purity GUIを使用した確認と物理交換作業のフロー。"),
        ),
        doc(
            "hpe-nimble-controller",
            "HPE Nimble Storage - コントローラー交換手順",
            Storage,
            "HPE",
            "Nimble AF/HF",
            date(2023, 10, 5),
            "#box-nimble-ctrl",
            false,
            &["Controller", "Replacement", "HA"],
            None,
        ),
        // ── Network (Cisco, Juniper, Fortinet, Palo Alto) ──────────────────
        doc(
            "cisco-cat-ios-upgrade",
            "Cisco Catalyst 2960X/9200 - IOSバージョンアップ手順",
            Network,
            "Cisco",
            "Catalyst",
            date(2024, 2, 28),
            "#box-cisco-ios",
            false,
            &["Firmware", "Upgrade", "IOS"],
            Some("TFTPサーバーを使用したIOSイメージの転送とBoot変数の書き換え。"),
        ),
        doc(
            "cisco-nexus-vpc",
            "Cisco Nexus 9000 - vPC設定ガイド",
            Network,
            "Cisco",
            "Nexus 9000",
            date(2023, 10, 10),
            "#box-nexus-vpc",
            false,
            &["Config", "vPC", "Switching"],
            None,
        ),
        doc(
            "juniper-ex-vlan",
            "Juniper EXシリーズ - VLAN設定およびTrunk設定",
            Network,
            "Juniper",
            "EX Series",
            date(2023, 7, 22),
            "#box-juniper-vlan",
            false,
            &["VLAN", "Config", "Junos"],
            None,
        ),
        doc(
            "fortigate-firmware",
            "Fortinet FortiGate - ファームウェアアップグレードパス確認と実行",
            Network,
            "Fortinet",
            "FortiGate",
            date(2024, 3, 15),
            "#box-forti-fw",
            true,
            &["Firmware", "Security", "Upgrade"],
            Some("Upgrade Path Toolを使用した適切なバージョンの選定と適用手順。"),
        ),
        doc(
            "paloalto-pa3220-rma",
            "Palo Alto PA-3220 - 筐体交換(RMA)手順",
            Network,
            "Palo Alto",
            "PA-3000 Series",
            date(2024, 1, 15),
            "#box-pa3220-rma",
            true,
            &["Security", "RMA", "Restore"],
            Some("ライセンスのデアクティベーションとコンフィグのリストア手順。"),
        ),
        // ── Tape libraries (IBM, HPE) ──────────────────────────────────────
        doc(
            "ibm-ts4300-drive",
            "IBM TS4300 - テープドライブ交換手順",
            Library,
            "IBM",
            "TS4300",
            date(2023, 5, 30),
            "#box-ts4300-drive",
            false,
            &["Tape", "Drive", "Replacement"],
            Some("WebGUIからのドライブオフライン化および物理交換手順。"),
        ),
        doc(
            "hpe-msl-robot",
            "HPE MSL3040 - ロボットアセンブリ交換",
            Library,
            "HPE",
            "MSL3040",
            date(2022, 11, 12),
            "#box-msl-robot",
            false,
            &["Robotics", "Maintenance", "Replacement"],
            None,
        ),
        // ── General / OS (VMware, Linux, facility standards) ───────────────
        doc(
            "vmware-esxi-logs",
            "VMware ESXi - vm-supportログ取得手順",
            General,
            "VMware",
            "vSphere 7/8",
            date(2024, 1, 5),
            "#box-esxi-logs",
            true,
            &["Logs", "Virtualization", "Troubleshooting"],
            None,
        ),
        doc(
            "redhat-sosreport",
            "RHEL/CentOS - sosreport取得手順",
            General,
            "Red Hat",
            "RHEL 7/8/9",
            date(2023, 8, 8),
            "#box-sosreport",
            false,
            &["Logs", "Linux", "Troubleshooting"],
            None,
        ),
        doc(
            "apc-smt1500-battery",
            "APC Smart-UPS 1500 - バッテリーモジュール交換",
            General,
            "APC (Schneider)",
            "Smart-UPS",
            date(2022, 9, 1),
            "#box-apc-batt",
            false,
            &["UPS", "Battery", "Maintenance"],
            None,
        ),
        doc(
            "dcss-cabling-standard",
            "DCSS標準 - サーバーラック配線・整線ガイドライン",
            General,
            "DCSS",
            "Standard",
            date(2023, 4, 1),
            "#box-dcss-cabling",
            true,
            &["Cabling", "Best Practice", "Training"],
            Some("電源ケーブルおよびLAN/FCケーブルの敷設ルールとベルクロ固定要領。"),
        ),
        doc(
            "dcss-esd-safety",
            "静電気放電(ESD)対策および作業安全基準",
            General,
            "DCSS",
            "Safety",
            date(2023, 1, 1),
            "#box-dcss-esd",
            false,
            &["Safety", "ESD", "Compliance"],
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_exactly_one_admin() {
        let accounts = seed_accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].role, Role::Admin);
        assert_eq!(accounts[0].email, "feng.dou@dcsstech.com");
    }

    #[test]
    fn seed_document_ids_are_unique() {
        let docs = seed_documents();
        let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn seed_covers_every_category() {
        let docs = seed_documents();
        for category in [
            EquipmentCategory::Server,
            EquipmentCategory::Storage,
            EquipmentCategory::Network,
            EquipmentCategory::Library,
            EquipmentCategory::General,
        ] {
            assert!(
                docs.iter().any(|d| d.category == category),
                "no seed document for {}",
                category
            );
        }
    }

    #[test]
    fn seed_contains_the_dl380_hdd_procedure() {
        let docs = seed_documents();
        let hdd = docs
            .iter()
            .find(|d| d.id == "hpe-dl380-g10-hdd")
            .expect("DL380 HDD procedure seeded");
        assert_eq!(hdd.category, EquipmentCategory::Server);
        assert_eq!(hdd.tags, vec!["HDD", "Maintenance", "Replacement"]);
        assert!(hdd.is_favorite);
    }

    #[test]
    fn seed_titles_are_non_empty() {
        assert!(seed_documents().iter().all(|d| !d.title.is_empty()));
    }
}
