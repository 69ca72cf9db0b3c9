use clap::Parser;
use slip_reader::{cli, config, error, export, extractor, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SlipReaderError};
use slip_reader_common::{result_rows, SubmitStatus};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { file, json, endpoint } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let client = extractor::SlipClient::new(endpoint, config.timeout())?;
            let slip = scanner::SlipFile::read(&file)?;

            if !json {
                println!("🧾 slip-reader - スリップ抽出\n");
                println!("- 送信中: {} → {}", slip.file_name, client.endpoint());
            }

            let (view, status) = extractor::extract_one(&client, slip).await;

            match (status, view.result()) {
                (SubmitStatus::Extracted, Some(result)) if json => {
                    println!("{}", serde_json::to_string_pretty(result)?);
                }
                (SubmitStatus::Extracted, Some(result)) => {
                    println!("✔ 抽出完了\n");
                    for row in result_rows(result) {
                        println!("  {:<16}{}", row.label, row.value);
                    }
                }
                _ => {
                    let reason = view.last_error().unwrap_or("送信されませんでした").to_string();
                    return Err(SlipReaderError::ApiCall(reason));
                }
            }
        }

        Commands::Batch { folder, output, json, use_cache, recursive, endpoint } => {
            println!("🧾 slip-reader - 一括抽出\n");

            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let client = extractor::SlipClient::new(endpoint, config.timeout())?;

            // 1. スキャン
            println!("[1/3] スリップをスキャン中...");
            let images = scanner::scan_folder(&folder, recursive)?;
            if images.is_empty() {
                return Err(SlipReaderError::NoImagesFound(folder.display().to_string()));
            }
            println!("✔ {}枚のスリップを検出\n", images.len());

            // 2. 抽出
            println!("[2/3] 抽出中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let outcome = if use_cache {
                extractor::extract_folder_with_cache(&client, &images, &folder, true).await?
            } else {
                extractor::extract_batch(&client, &images, None, true).await?
            };
            println!(
                "✔ 抽出完了: 成功 {}件 / 失敗 {}件{}\n",
                outcome.records.len(),
                outcome.failures.len(),
                if outcome.cache_hits > 0 { format!(" (キャッシュ {}件)", outcome.cache_hits) } else { String::new() }
            );
            for (file_name, reason) in &outcome.failures {
                println!("  ✘ {}: {}", file_name, reason);
            }

            if outcome.records.is_empty() {
                return Err(SlipReaderError::AllUploadsFailed(outcome.failures.len()));
            }

            // 3. 出力
            println!("[3/3] 結果を保存中...");
            if let Some(json_path) = json.as_deref() {
                let path = export::export_json(&outcome.records, json_path)?;
                println!("✔ JSON出力: {}", path.display());
            }
            if output.is_some() || json.is_none() {
                let target = output.unwrap_or_else(|| folder.clone());
                let path = export::export_ledger(&outcome.records, &target)?;
                println!("✔ Excel出力: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Health { endpoint } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let client = extractor::SlipClient::new(endpoint, config.timeout())?;
            let status = client.health().await?;

            let mark = if status.is_ok() { "✔" } else { "⚠" };
            println!("{} {} - {}", mark, status.status, status.message);
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  使用中のエンドポイント: {}", config.resolve_endpoint(None));
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| std::path::PathBuf::from("."));
            let cache_path = extractor::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = extractor::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match extractor::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_target(verbose)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
