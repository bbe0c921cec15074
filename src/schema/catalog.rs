//! Built-in attribute catalog of the laptop/desktop listing table.

use crate::schema::vocabularies::{BRANDS, GRAPHICS_CARDS, PROCESSORS, SCREEN_TECHNOLOGIES};
use crate::schema::AttributeSpec;

/// Attributes left out of the similarity space by default. They still reach
/// the price model.
pub const DEFAULT_SIMILARITY_EXCLUSIONS: &[&str] = &[
    "depth_cm",
    "weight_kg",
    "tdp_w",
    "width_cm",
    "offer_count",
    "screen_diagonal_cm",
    "height_mm",
];

const EQUIPMENT_FLAGS: &[(&str, &str)] = &[
    ("force_touch_trackpad", "equip_Force Touch Trackpad"),
    ("screenpad", "equip_ScreenPad"),
    ("touch_bar", "equip_Touch Bar"),
    ("touch_id", "equip_Touch ID"),
    ("multitouch_touchpad", "equip_Touchpad multitáctil"),
    ("pointing_stick", "equip_TrackPoint / TouchStick / Pointing Stick"),
    ("usb_c", "equip_USB-C"),
    ("stereo_speakers", "equip_altavoces estéreo"),
    ("jbl_stereo_speakers", "equip_altavoces estéreo JBL"),
    ("built_in_speaker", "equip_altavoz integrado"),
    ("backlit_keyboard", "equip_con iluminación"),
    ("kensington_slot", "equip_conector de seguridad Kensington"),
    ("ssd_equipped", "equip_disco duro SSD"),
    ("card_reader", "equip_lector de tarjetas"),
    ("smart_card_reader", "equip_lector de tarjetas inteligentes"),
    ("built_in_microphone", "equip_micrófono integrado"),
    ("liquid_cooling", "equip_refrigeración líquida"),
    ("webcam", "equip_webcam"),
];

const CONNECTIVITY_FLAGS: &[(&str, &str)] = &[
    ("bluetooth", "Bluetooth"),
    ("ethernet", "Ethernet"),
    ("lan", "LAN"),
    ("nfc", "NFC"),
    ("infrared", "infrarrojos"),
    ("wifi", "wifi"),
    ("wifi_direct", "wifi Direct"),
];

/// A listing can expose several outputs at once, so each one is its own flag.
const VIDEO_OUTPUT_FLAGS: &[(&str, &str)] = &[
    ("video_dvi", "gráfica_salida_vídeo_DVI"),
    ("video_displayport", "gráfica_salida_vídeo_DisplayPort"),
    ("video_hdmi", "gráfica_salida_vídeo_HDMI"),
    ("video_hdmi_1_4", "gráfica_salida_vídeo_HDMI 1.4"),
    ("video_hdmi_2_0", "gráfica_salida_vídeo_HDMI 2.0"),
    ("video_hdmi_2_1", "gráfica_salida_vídeo_HDMI 2.1"),
    ("video_micro_hdmi", "gráfica_salida_vídeo_Micro HDMI"),
    ("video_mini_displayport", "gráfica_salida_vídeo_Mini DisplayPort"),
    ("video_mini_hdmi", "gráfica_salida_vídeo_Mini HDMI"),
    ("video_thunderbolt_3", "gráfica_salida_vídeo_Thunderbolt 3"),
    ("video_thunderbolt_4", "gráfica_salida_vídeo_Thunderbolt 4"),
    ("video_usb_c", "gráfica_salida_vídeo_USB-C"),
    ("video_vga", "gráfica_salida_vídeo_VGA"),
];

pub fn laptop_catalog() -> Vec<AttributeSpec> {
    let mut catalog = vec![
        one_hot("device_type", "tipo_", "nan"),
        one_hot("product_type", "tipo_producto_", "nan"),
        label_encoded("brand", "company_name_label", BRANDS, "ASRock"),
        one_hot("ram_type", "ram_tipo_ram_", "nan"),
        numeric("ram_gb", "ram_memoria_ram_GB", 0.0, 256.0, 16.0),
        numeric("ram_frequency_mhz", "ram_frecuencia_memoria_MHz", 1600.0, 8533.0, 3200.0),
        one_hot("operating_system", "os_", "Other OS"),
        one_hot("color", "color_", "nan"),
        numeric("screen_size_in", "pantalla_tamaño_pantalla_pulgadas", 5.0, 40.0, 15.6),
        numeric("screen_diagonal_cm", "pantalla_diagonal_pantalla_cm", 12.0, 100.0, 39.6),
        numeric("screen_brightness_nits", "pantalla_luminosidad_cd_m2", 100.0, 1500.0, 300.0),
        label_encoded(
            "screen_technology",
            "pantalla_tecnología_pantalla_label",
            SCREEN_TECHNOLOGIES,
            "Missing_value",
        ),
        one_hot("storage_type", "disco_duro_tipo_disco_duro_", "nan"),
        numeric("storage_capacity_gb", "disco_duro_capacidad_memoria_ssd_GB", 8.0, 8000.0, 1000.0),
        numeric("installed_disks", "disco_duro_número_discos_duros_instalados", 0.0, 3.0, 1.0),
        label_encoded("processor", "procesador_name_label", PROCESSORS, "Missing_value"),
        one_hot("cache_level", "procesador_nivel_caché_", "nan"),
        numeric("turbo_frequency_ghz", "procesador_frecuencia_turbo_máx__GHz", 1.9, 6.0, 5.0),
        numeric("threads", "procesador_número_hilos_ejecución", 2.0, 32.0, 12.0),
        numeric("tdp_w", "procesador_tdp_W", 2.0, 280.0, 65.0),
        numeric("cores", "procesador_número_núcleos_procesador_cores", 1.0, 32.0, 8.0),
        numeric("base_clock_ghz", "procesador_frecuencia_reloj", 0.5, 4.3, 1.0),
        numeric("cpu_cache_mb", "procesador_caché_MB", 1.0, 128.0, 12.0),
        numeric("cpu_frequency_ghz", "procesador_frecuencia", 0.0011, 4.7, 2.5),
        label_encoded(
            "graphics_card",
            "gráfica_tarjeta_gráfica_label",
            GRAPHICS_CARDS,
            "sin tarjeta gráfica",
        ),
        numeric("battery_wh", "alimentación_vatios_hora_Wh", 10.0, 150.0, 50.0),
        numeric("battery_life_h", "alimentación_autonomía_batería_h", 1.0, 24.0, 8.0),
        numeric("height_mm", "altura_mm", 0.0, 560.0, 101.0),
        numeric("depth_cm", "medidas_profundidad_cm", 3.0, 55.0, 24.7),
        numeric("weight_kg", "medidas_peso_kg", 0.2, 24.0, 2.45),
        numeric("width_cm", "medidas_ancho_cm", 3.0, 92.0, 27.3),
        numeric("release_year", "otras_características_fecha_lanzamiento", 2013.0, 2025.0, 2023.0),
        numeric("offer_count", "ofertas_count", 0.0, 100.0, 3.0),
        numeric("speaker_count", "sonido_número_altavoces", 0.0, 8.0, 2.0),
        one_hot("optical_drive", "almacenamiento_lector_óptico_", "nan"),
    ];

    // Independent yes/no features
    for (name, column) in EQUIPMENT_FLAGS.iter().chain(CONNECTIVITY_FLAGS) {
        catalog.push(numeric(name, column, 0.0, 1.0, 0.0));
    }
    for (name, column) in VIDEO_OUTPUT_FLAGS {
        let default = if *name == "video_hdmi" { 1.0 } else { 0.0 };
        catalog.push(numeric(name, column, 0.0, 1.0, default));
    }

    catalog
}

fn numeric(name: &str, column: &str, min: f64, max: f64, default: f64) -> AttributeSpec {
    AttributeSpec::Numeric {
        name: name.to_string(),
        column: column.to_string(),
        min,
        max,
        default,
    }
}

fn one_hot(name: &str, prefix: &str, default: &str) -> AttributeSpec {
    AttributeSpec::OneHot {
        name: name.to_string(),
        prefix: prefix.to_string(),
        default: default.to_string(),
    }
}

fn label_encoded(name: &str, column: &str, labels: &[&str], default: &str) -> AttributeSpec {
    AttributeSpec::LabelEncoded {
        name: name.to_string(),
        column: column.to_string(),
        labels: labels.iter().map(|label| label.to_string()).collect(),
        default: default.to_string(),
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use crate::schema::{FeatureKind, FeatureSchema};

    fn laptop_headers() -> Vec<String> {
        let mut headers = Vec::new();
        for spec in laptop_catalog() {
            match spec {
                AttributeSpec::Numeric { column, .. }
                | AttributeSpec::LabelEncoded { column, .. } => headers.push(column),
                AttributeSpec::OneHot {
                    prefix, default, ..
                } => {
                    headers.push(format!("{}{}", prefix, "A"));
                    headers.push(format!("{}{}", prefix, default));
                }
            }
        }
        headers
    }

    #[test]
    fn should_resolve_against_matching_headers() {
        let schema = FeatureSchema::from_headers(&laptop_catalog(), &laptop_headers()).unwrap();

        assert_eq!(8, schema.qty_families());
        assert_eq!(
            vec!["tipo_A", "tipo_nan"],
            schema.family_members("device_type").unwrap()
        );
        let brand = schema.attribute("brand").unwrap();
        assert_eq!(FeatureKind::LabelEncoded, brand.kind);
        assert_eq!(Some(0), brand.default_option);
    }

    #[test]
    fn should_declare_video_outputs_as_independent_flags() {
        let schema = FeatureSchema::from_headers(&laptop_catalog(), &laptop_headers()).unwrap();

        assert!(schema.family_members("video_output").is_none());
        let hdmi = schema.attribute("video_hdmi").unwrap();
        let vga = schema.attribute("video_vga").unwrap();
        assert_eq!(FeatureKind::Numeric, hdmi.kind);
        assert_eq!(FeatureKind::Numeric, vga.kind);
        assert_ne!(hdmi.columns, vga.columns);
    }

    #[test]
    fn should_only_exclude_declared_attributes() {
        let catalog = laptop_catalog();
        for excluded in DEFAULT_SIMILARITY_EXCLUSIONS {
            assert!(catalog.iter().any(|spec| spec.name() == *excluded));
        }
    }
}
