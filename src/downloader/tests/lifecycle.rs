use super::*;

#[tokio::test]
async fn download_is_a_no_op_without_save_directory() {
    let transfer = Arc::new(FakeTransfer::writing(b"data"));
    let downloader = MediaDownloader::new(Config::default(), transfer.clone()).unwrap();
    let mut rx = downloader.subscribe();

    let handle = downloader.download(media("1", "https://example.com/a.mp4"), None);

    assert!(handle.is_none(), "disabled downloader must not spawn a task");
    assert!(transfer.requests().is_empty());
    assert!(rx.try_recv().is_err(), "no events for a disabled download");
}

#[tokio::test]
async fn successful_download_emits_progress_then_done() {
    let transfer = Arc::new(FakeTransfer::writing(b"payload"));
    let (downloader, _tmp) = create_test_downloader(transfer.clone(), |_| {});
    let mut rx = downloader.subscribe();

    downloader
        .download(media("r1", "https://example.com/a.mp4"), None)
        .unwrap()
        .await
        .unwrap();

    let events = collect_until_terminal(&mut rx, &["r1"]).await.remove("r1").unwrap();
    assert_eq!(
        statuses(&events),
        vec![
            DownloadStatus::Running,
            DownloadStatus::Running,
            DownloadStatus::Running,
            DownloadStatus::Done
        ]
    );
    let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["25%", "50%", "100%", "done"]);

    let save_path = &events[0].save_path;
    assert!(events.iter().all(|e| &e.save_path == save_path));
    assert_eq!(std::fs::read(save_path).unwrap(), b"payload");
}

#[tokio::test]
async fn transfer_request_carries_path_parallelism_and_headers() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, tmp) = create_test_downloader(transfer.clone(), |c| c.task_number = 8);

    let mut m = media("r1", "https://example.com/a.mp4");
    m.description = "My Clip!".to_string();
    m.other_data.insert(
        HEADERS_KEY.to_string(),
        r#"{"Referer":["https://ref","https://other"],"X-None":[]}"#.to_string(),
    );
    downloader.download(m, None).unwrap().await.unwrap();

    let requests = transfer.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url, "https://example.com/a.mp4");
    assert_eq!(request.parallelism, 8);
    assert_eq!(
        request.destination,
        tmp.path().join("downloads").join("MyClip.mp4")
    );
    assert_eq!(
        request.headers,
        HashMap::from([("Referer".to_string(), "https://ref".to_string())])
    );
}

#[tokio::test]
async fn malformed_header_json_still_downloads() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, _tmp) = create_test_downloader(transfer.clone(), |_| {});
    let mut rx = downloader.subscribe();

    let mut m = media("r1", "https://example.com/a.mp4");
    m.other_data
        .insert(HEADERS_KEY.to_string(), "{broken".to_string());
    downloader.download(m, None).unwrap().await.unwrap();

    let events = collect_until_terminal(&mut rx, &["r1"]).await.remove("r1").unwrap();
    assert_eq!(events.last().unwrap().status, DownloadStatus::Done);
    assert!(transfer.requests()[0].headers.is_empty());
}

#[tokio::test]
async fn transfer_failure_emits_error_and_never_done() {
    let transfer = Arc::new(FakeTransfer::failing("connection reset"));
    let (downloader, _tmp) = create_test_downloader(transfer, |_| {});
    let mut rx = downloader.subscribe();

    downloader
        .download(media("r1", "https://example.com/a.mp4"), Some("AQID".into()))
        .unwrap()
        .await
        .unwrap();

    let events = collect_until_terminal(&mut rx, &["r1"]).await.remove("r1").unwrap();
    assert_eq!(
        statuses(&events),
        vec![DownloadStatus::Running, DownloadStatus::Error]
    );
    assert!(events[1].message.contains("connection reset"));
    assert!(
        events.iter().all(|e| e.message != "decrypting"),
        "decode must not start after a failed transfer"
    );
    assert!(rx.try_recv().is_err(), "nothing may follow the terminal event");
}

#[tokio::test]
async fn quality_tier_one_rewrites_url_before_transfer() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, _tmp) = create_test_downloader(transfer.clone(), |c| c.quality = 1);
    let url = "https://x.qq.com/a?foo=1&encfilekey=K&token=T&bar=2";

    downloader.download(media("r1", url), None).unwrap().await.unwrap();

    assert_eq!(
        transfer.requests()[0].url,
        "https://x.qq.com/a?encfilekey=K&token=T"
    );
}

#[tokio::test]
async fn filename_hash_uses_url_before_rewrite() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, tmp) = create_test_downloader(transfer.clone(), |c| c.quality = 2);
    let url = "https://v.qq.com/video?token=T";

    let mut m = media("r1", url);
    m.other_data
        .insert(FILE_FORMATS_KEY.to_string(), "hd#sd".to_string());
    downloader.download(m, None).unwrap().await.unwrap();

    let request = &transfer.requests()[0];
    assert_eq!(request.url, "https://v.qq.com/video?token=T&X-snsvideoflag=hd");
    let expected = format!("{:x}.mp4", md5::compute(url.as_bytes()));
    assert_eq!(request.destination, tmp.path().join("downloads").join(expected));
}

#[tokio::test]
async fn events_from_many_resources_each_end_once() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, _tmp) = create_test_downloader(transfer, |_| {});
    let mut rx = downloader.subscribe();

    let ids = ["a", "b", "c", "d", "e"];
    let handles: Vec<_> = ids
        .iter()
        .map(|id| {
            let mut m = media(id, &format!("https://example.com/{id}.mp4"));
            m.description = format!("clip {id}");
            downloader.download(m, None).unwrap()
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let by_id = collect_until_terminal(&mut rx, &ids).await;
    for id in ids {
        let events = &by_id[id];
        let terminal: Vec<_> = events.iter().filter(|e| e.status.is_terminal()).collect();
        assert_eq!(terminal.len(), 1, "{id} must end exactly once");
        assert_eq!(events.last().unwrap().status, DownloadStatus::Done);
    }
}

#[tokio::test]
async fn config_is_shared_not_copied() {
    let (downloader, tmp) =
        create_test_downloader(Arc::new(FakeTransfer::default()), |c| c.quality = 2);

    let config = downloader.get_config();

    assert_eq!(config.quality, 2);
    assert_eq!(config.save_directory, tmp.path().join("downloads"));
    assert!(Arc::ptr_eq(&config, &downloader.clone().get_config()));
}

#[tokio::test]
async fn unprintable_description_does_not_collide_on_hidden_file() {
    let transfer = Arc::new(FakeTransfer::writing(b"x"));
    let (downloader, tmp) = create_test_downloader(transfer.clone(), |_| {});

    for (id, url) in [("a", "https://example.com/a"), ("b", "https://example.com/b")] {
        let mut m = media(id, url);
        m.description = "!!!".to_string();
        downloader.download(m, None).unwrap().await.unwrap();
    }

    let destinations: Vec<_> = transfer
        .requests()
        .into_iter()
        .map(|r| r.destination)
        .collect();
    assert_ne!(destinations[0], destinations[1]);
    assert!(
        destinations
            .iter()
            .all(|d| d != &tmp.path().join("downloads").join(".mp4"))
    );
}
