#[cfg(test)]
mod tests {
    use image::DynamicImage;
    use imprint::analysis::simhash::hamming_distance;
    use imprint::processing::envelope::Envelope;
    use imprint::{
        DrawerConfig, DrawerKind, Fingerprinter, ImprintError, ImprintService, RenderPipeline,
        StegoCodec, StegoError,
    };

    fn service() -> ImprintService {
        ImprintService::new(
            Fingerprinter::default(),
            RenderPipeline::default(),
            StegoCodec::new(1000),
        )
    }

    #[test]
    fn test_hello_world_scenario() {
        let service = service();
        let fingerprint = service.fingerprint("Hello, world!");
        assert_eq!(fingerprint.hash().len(), 32);
        assert!(fingerprint.hash().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(fingerprint.canvas_size, 1000);
        assert_eq!(Envelope::plain("Hello, world!").unwrap().header.total_bits(), 272);

        let imprint = service.create("Hello, world!", None, None).unwrap();
        assert_eq!(imprint.dimensions(), (1000, 1000));
        assert_eq!(
            service.parse(&DynamicImage::ImageRgb8(imprint), None).unwrap(),
            "Hello, world!"
        );
    }

    #[test]
    fn test_roundtrip_passwords() {
        let service = service();
        let long_password = "correct horse battery staple ✓ 0123456789".repeat(4);
        let text = "Line one\nLine two, with ünïcödé and emoji 🌱";

        for password in [None, Some("x"), Some(long_password.as_str())] {
            let png = service.create_png(text, password, None).unwrap();
            assert_eq!(service.parse_png(&png, password).unwrap(), text);
        }
    }

    #[test]
    fn test_empty_text_roundtrip() {
        let service = service();
        let png = service.create_png("", None, None).unwrap();
        assert_eq!(service.parse_png(&png, None).unwrap(), "");
    }

    #[test]
    fn test_wrong_and_missing_password() {
        let service = service();
        let png = service.create_png("guarded", Some("right"), None).unwrap();

        assert!(matches!(
            service.parse_png(&png, Some("wrong")),
            Err(ImprintError::Stego(StegoError::AuthenticationFailed))
        ));
        assert!(matches!(
            service.parse_png(&png, None),
            Err(ImprintError::Stego(StegoError::PasswordRequired))
        ));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let service = service();
        let drawers: Vec<DrawerConfig> = DrawerKind::ALL.into_iter().map(DrawerConfig::new).collect();

        let a = service.create("The quick brown fox", None, Some(&drawers)).unwrap();
        let b = service.create("The quick brown fox", None, Some(&drawers)).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());

        let c = service.create("The quick brown fax", None, Some(&drawers)).unwrap();
        assert_ne!(a.as_raw(), c.as_raw());
    }

    #[test]
    fn test_near_duplicate_texts_have_close_fingerprints() {
        let fingerprinter = Fingerprinter::default();
        let base = "The committee will meet on Thursday to review the annual budget and \
                    discuss the proposed changes to the travel policy for next year.";
        let edited = base.replace("Thursday", "Friday");
        let unrelated = "Photosynthesis converts light energy into chemical energy stored \
                         in glucose, releasing oxygen as a by-product of splitting water.";

        let a = fingerprinter.analyze(base);
        let b = fingerprinter.analyze(&edited);
        let c = fingerprinter.analyze(unrelated);

        assert!(
            hamming_distance(a.byte_list(), b.byte_list())
                < hamming_distance(a.byte_list(), c.byte_list())
        );
    }

    #[test]
    fn test_long_text_gets_a_larger_canvas() {
        let service = service();
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let fingerprint = service.fingerprint(&text);
        assert!(fingerprint.canvas_size > 1000);

        let drawers = [DrawerConfig::new(DrawerKind::Core)];
        let png = service.create_png(&text, Some("pw"), Some(&drawers)).unwrap();
        assert_eq!(service.parse_png(&png, Some("pw")).unwrap(), text);
    }
}
