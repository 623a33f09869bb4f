use anyhow::Context;
use chofu_population_map::{
    catalog::SheetCatalog, cli, config::AppConfig, geo, history, metrics, reader, school,
};
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("設定の読み込みに失敗: {}", cli.config.display()))?;

    match cli.command {
        Commands::Periods => {
            let catalog = SheetCatalog::new(&config);
            print_warnings(catalog.warnings());

            println!("📅 利用できる年月:\n");
            for period in catalog.list_periods() {
                println!("  {} ({}: {})", period.label(), period.file_key, period.sheet_name);
            }
        }

        Commands::Map { period, output } => {
            println!("🗾 chofu-population-map - ヒートマップ用データ生成\n");

            let catalog = SheetCatalog::new(&config);
            print_warnings(catalog.warnings());

            let selected = match &period {
                Some(label) => catalog
                    .find_by_label(label)
                    .ok_or_else(|| anyhow::anyhow!("指定された年月が見つかりません: {}", label))?,
                None => catalog
                    .list_periods()
                    .first()
                    .ok_or_else(|| anyhow::anyhow!("利用できる年月がありません"))?,
            };

            println!("[1/4] {} のデータを読み込み中...", selected.label());
            let (path, sheet_name) = catalog.resolve(selected)?;
            let rows = reader::read_population_sheet(&path, sheet_name)?;
            println!("✔ {}件の町丁データを取得\n", rows.len());

            println!("[2/4] 境界データと結合中...");
            let polygons = geo::load_boundaries(&config.boundary_path)?;
            let joined = geo::join(&polygons, &rows);
            println!("✔ {}件の町丁境界に結合\n", joined.len());

            println!("[3/4] GeoJSONを出力中...");
            let feature_collection = geo::to_feature_collection(&joined);
            std::fs::write(&output, serde_json::to_string_pretty(&feature_collection)?)?;
            println!("✔ 出力: {}\n", output.display());

            // 学校マーカーは任意の重ね合わせ。読めなくても地図生成は続行する
            println!("[4/4] 学校マーカー用データを読み込み中...");
            for school_type in [school::SchoolType::Elementary, school::SchoolType::JuniorHigh] {
                match school::load_schools(&config.school_data_path, school_type) {
                    Ok(schools) => println!("✔ {}: {}校", school_type, schools.len()),
                    Err(e) => eprintln!("⚠ {}マーカーを省略します: {}", school_type, e),
                }
            }
            println!();

            print_metrics(&metrics::build_metrics(&catalog, selected, &rows));

            println!("\n✅ 完了");
        }

        Commands::History { output } => {
            println!("📈 chofu-population-map - 人口推移テーブル生成\n");

            let catalog = SheetCatalog::new(&config);
            print_warnings(catalog.warnings());

            println!("[1/2] 全期間のデータを読み込み中...");
            let table = history::build_history(&catalog);
            for warning in &table.warnings {
                eprintln!("⚠ 読み込みに失敗した期間を除外: {}", warning);
            }
            println!("✔ {}行の履歴を生成\n", table.rows.len());

            println!("[2/2] JSONを出力中...");
            let mut rows = table.rows;
            // グラフ描画側に合わせて日付の昇順で出力する
            rows.sort_by_key(|row| history::period_label_to_date(&row.period_label));
            std::fs::write(&output, serde_json::to_string_pretty(&rows)?)?;
            println!("✔ 出力: {}", output.display());

            println!("\n✅ 完了");
        }
    }

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("⚠ {}", warning);
    }
}

fn print_metrics(report: &metrics::MetricsReport) {
    println!("📊 集計:");
    let current = report.current;
    match report.deltas {
        Some(deltas) => {
            println!("  総人口: {}人 (1年前から{:+}人)", current.population, deltas.population);
            println!("  総世帯数: {}世帯 (1年前から{:+}世帯)", current.households, deltas.households);
            println!("  男性: {}人 (1年前から{:+}人)", current.male, deltas.male);
            println!("  女性: {}人 (1年前から{:+}人)", current.female, deltas.female);
        }
        None => {
            println!("  総人口: {}人", current.population);
            println!("  総世帯数: {}世帯", current.households);
            println!("  男性: {}人", current.male);
            println!("  女性: {}人", current.female);
        }
    }
}
