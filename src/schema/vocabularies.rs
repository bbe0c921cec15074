//! Controlled name → code tables of the label-encoded attributes.
//!
//! The position of a name is the integer code the historical table and the
//! price model were encoded with, so entries must never be reordered.

pub const BRANDS: &[&str] = &[
    "ASRock", "ASUS", "AWow", "Abra", "Acemagic", "Acemagician", "Acer", "Actina", "Adonia",
    "Advance", "Alienware", "Alurin", "Ankermann", "Apple", "Arc", "BEASTCOM", "BMAX", "Basic",
    "Basilisk", "Beelink", "Blackview", "Captiva", "Chuwi", "Concept", "Corsair", "Deep",
    "DeepGaming", "Dell", "Denver", "DeskMini", "Edge", "Elitegroup", "Ernitec", "F", "Force",
    "Fujitsu", "FutureNUC", "GPD", "GREED", "Gaming", "Geekom", "GemiBook", "GigaByte", "Gold",
    "HP", "Huawei", "Hyrican", "IT", "Innjoo", "Intel", "Iox", "Ioxbook", "Joule", "Kiebel",
    "LG", "Lenovo", "Leotec", "Lite", "MSI", "Mars", "MeLE", "Medion", "Memory", "Microsoft",
    "Minisforum", "Minix", "Neo", "Nexus", "NiPoGi", "Nilox", "Ninkear", "Nitropc", "NucBox",
    "Nuke", "Office", "Orbsmart", "Ouvis", "PC", "PcCom", "Plus", "Prime", "Primux", "Prixton",
    "Pro", "Quieter", "Racing", "Razer", "Samsung", "Schenker", "ScreenOn", "Sedatech",
    "Shuttle", "Silver", "Striker", "SuperMicro", "TB", "Techbite", "Technologies", "Tecra",
    "Thomson", "Toughline", "Tulpar", "U", "VIST", "Venom", "Vibox", "Viewsonic", "Vision", "X",
    "Xiaomi", "Yashi", "Zenith", "Zone", "Zotac", "iggual", "iiyama",
];

pub const PROCESSORS: &[&str] = &[
    "AMD 3000", "AMD A-Series", "AMD A10", "AMD Athlon", "AMD Athlon 3150U", "AMD GX",
    "AMD Ryzen", "AMD Ryzen 3", "AMD Ryzen 3 4300GE", "AMD Ryzen 5", "AMD Ryzen 5 4600G",
    "AMD Ryzen 5 7535U", "AMD Ryzen 7", "AMD Ryzen 7 3700U", "AMD Ryzen 7 5700U",
    "AMD Ryzen 7 7435HS", "AMD Ryzen 9", "AMD Ryzen 9 5900X", "AMD Ryzen AI 7", "AMD Ryzen AI 9",
    "AMD Ryzen Embedded", "AMD Ryzen Threadripper PRO", "AMD Ryzen Threadripper PRO 5955WX",
    "ARM Cortex", "Apple M1", "Apple M1 Pro", "Apple M1 Ultra", "Apple M2", "Apple M2 Max",
    "Apple M2 Pro", "Apple M2 Ultra", "Apple M3", "Apple M3 Max", "Apple M3 Pro", "Apple M4",
    "Apple M4 Max", "Apple M4 Pro", "Intel Atom", "Intel Atom D525", "Intel Atom E3815",
    "Intel Celeron", "Intel Celeron G1620", "Intel Celeron N4000", "Intel Celeron N4120",
    "Intel Core Ultra 5", "Intel Core Ultra 7", "Intel Core Ultra 9", "Intel Core i3",
    "Intel Core i5", "Intel Core i7", "Intel Core i9", "Intel N", "Intel Pentium",
    "Intel Pentium 6405U", "Intel Pentium Gold", "Intel Pentium N3700", "Intel Pentium Silver",
    "Intel Xeon", "Intel Xeon E5", "Intel Xeon Silver 4210R", "MediaTek Kompanio",
    "MediaTek MT8183", "Missing_value", "Qualcomm Kryo", "Qualcomm Snapdragon",
    "Qualcomm Snapdragon 7180c", "Qualcomm Snapdragon 8cx Gen3", "Qualcomm Snapdragon X Elite",
    "Qualcomm Snapdragon X Plus", "Qualcomm Snapdragon X Plus X1P", "RockChip RK3368",
    "VIA Eden",
];

pub const GRAPHICS_CARDS: &[&str] = &[
    "2 x AMD FirePro D700", "2 x nVidia GeForce GTX 980 Ti", "AMD Radeon", "AMD Radeon 610M",
    "AMD Radeon 660M", "AMD Radeon 680M", "AMD Radeon 740M", "AMD Radeon 760M",
    "AMD Radeon 780M", "AMD Radeon 860M", "AMD Radeon 880M", "AMD Radeon 890M",
    "AMD Radeon Graphics", "AMD Radeon R2E", "AMD Radeon R3", "AMD Radeon R4",
    "AMD Radeon R4 Graphics", "AMD Radeon R7", "AMD Radeon RX 480", "AMD Radeon RX 550",
    "AMD Radeon RX 6400", "AMD Radeon RX 6500 XT", "AMD Radeon RX 6500M", "AMD Radeon RX 6600",
    "AMD Radeon RX 6600M", "AMD Radeon RX 6700 XT", "AMD Radeon RX 6700S",
    "AMD Radeon RX 6750 XT", "AMD Radeon RX 7600", "AMD Radeon RX 7600S",
    "AMD Radeon RX 7700 XT", "AMD Radeon RX 7800 XT", "AMD Radeon RX 7900 GRE",
    "AMD Radeon RX 7900 XT", "AMD Radeon RX 7900 XTX", "AMD Radeon RX Vega",
    "AMD Radeon RX Vega 10", "AMD Radeon RX Vega 11", "AMD Radeon RX Vega 3",
    "AMD Radeon RX Vega 6", "AMD Radeon RX Vega 7", "AMD Radeon RX Vega 8",
    "AMD Radeon Vega 8 Graphics", "AMD Radeon Vega 9", "AMD Uma", "ARM Mali-G72 MP3",
    "Apple M2 GPU", "Apple M2 Graphics", "Apple M2 Max GPU", "Apple M2 Pro GPU",
    "Apple M2 Pro Graphics", "Apple M2 Ultra GPU", "Apple M3 Graphics", "Apple M3 Pro Graphics",
    "Apple M4 10-Core GPU", "Apple M4 Graphics", "Apple M4 Max Graphics",
    "Apple M4 Pro 16-Core GPU", "Apple M4 Pro Graphics", "Intel Arc A350M", "Intel Arc A370M",
    "Intel Arc A730M", "Intel Arc A770 Graphics", "Intel Arc Graphics",
    "Intel Arc Graphics 130V", "Intel Arc Graphics 140V", "Intel Arc Pro A30M", "Intel Graphics",
    "Intel HD Graphics", "Intel HD Graphics 400", "Intel HD Graphics 4000",
    "Intel HD Graphics 4400", "Intel HD Graphics 4600", "Intel HD Graphics 500",
    "Intel HD Graphics 520", "Intel HD Graphics 530", "Intel HD Graphics 540",
    "Intel HD Graphics 5500", "Intel HD Graphics 600", "Intel HD Graphics 605",
    "Intel HD Graphics 620", "Intel HD Graphics 630", "Intel Iris Graphics",
    "Intel Iris Graphics 6100", "Intel Iris Graphics 650", "Intel Iris Plus Graphics",
    "Intel Iris Plus Graphics 655", "Intel Iris Xe Graphics", "Intel UHD Graphics",
    "Intel UHD Graphics 1250", "Intel UHD Graphics 600", "Intel UHD Graphics 605",
    "Intel UHD Graphics 610", "Intel UHD Graphics 620", "Intel UHD Graphics 630",
    "Intel UHD Graphics 730", "Intel UHD Graphics 750", "Intel UHD Graphics 770",
    "Intel Xe Graphics", "Matrox G200", "Missing_value", "NVIDIA GeForce GT 1030",
    "NVIDIA GeForce GT 710", "NVIDIA GeForce GT 730", "NVIDIA GeForce GTX 1050",
    "NVIDIA GeForce GTX 1060", "NVIDIA GeForce GTX 1080", "NVIDIA GeForce GTX 1630",
    "NVIDIA GeForce GTX 1650", "NVIDIA GeForce GTX 1650 Super", "NVIDIA GeForce GTX 1660 Super",
    "NVIDIA GeForce GTX 1660 Ti", "NVIDIA GeForce GTX 950M", "NVIDIA GeForce GTX 970",
    "NVIDIA GeForce GTX 980", "NVIDIA GeForce MX250", "NVIDIA GeForce MX330",
    "NVIDIA GeForce MX350", "NVIDIA GeForce MX450", "NVIDIA GeForce MX550",
    "NVIDIA GeForce MX570", "NVIDIA GeForce RTX 2050", "NVIDIA GeForce RTX 2060",
    "NVIDIA GeForce RTX 2070 Super", "NVIDIA GeForce RTX 2080 Super", "NVIDIA GeForce RTX 3050",
    "NVIDIA GeForce RTX 3050 Ti", "NVIDIA GeForce RTX 3060", "NVIDIA GeForce RTX 3060 Ti",
    "NVIDIA GeForce RTX 3070", "NVIDIA GeForce RTX 3070 Ti", "NVIDIA GeForce RTX 3080",
    "NVIDIA GeForce RTX 3080 Ti", "NVIDIA GeForce RTX 3090", "NVIDIA GeForce RTX 4050",
    "NVIDIA GeForce RTX 4060", "NVIDIA GeForce RTX 4060 Ti", "NVIDIA GeForce RTX 4070",
    "NVIDIA GeForce RTX 4070 Super", "NVIDIA GeForce RTX 4070 Ti",
    "NVIDIA GeForce RTX 4070 Ti Super", "NVIDIA GeForce RTX 4080",
    "NVIDIA GeForce RTX 4080 Super", "NVIDIA GeForce RTX 4090", "NVIDIA Quadro 600",
    "NVIDIA Quadro M2000", "NVIDIA Quadro P1000", "NVIDIA Quadro P2200", "NVIDIA Quadro P520",
    "NVIDIA Quadro RTX 3000", "NVIDIA Quadro RTX 4000", "NVIDIA Quadro RTX 5000",
    "NVIDIA Quadro RTX 6000", "NVIDIA Quadro RTX A5000", "NVIDIA Quadro T1000",
    "NVIDIA Quadro T2000", "NVIDIA Quadro T400", "NVIDIA RTX 1000 Ada", "NVIDIA RTX 2000",
    "NVIDIA RTX 2000 Ada", "NVIDIA RTX 3000 Ada", "NVIDIA RTX 3500", "NVIDIA RTX 3500 Ada",
    "NVIDIA RTX 4000 Ada", "NVIDIA RTX 4500 Ada", "NVIDIA RTX 500 Ada", "NVIDIA RTX 5000 Ada",
    "NVIDIA RTX A1000", "NVIDIA RTX A2000", "NVIDIA RTX A3000", "NVIDIA RTX A400",
    "NVIDIA RTX A4000", "NVIDIA RTX A4500", "NVIDIA RTX A500", "NVIDIA RTX A5000",
    "NVIDIA RTX A5500", "NVIDIA RTX A6000", "NVIDIA T1000", "NVIDIA T1200", "NVIDIA T400",
    "NVIDIA T550", "NVIDIA T600", "PowerVR SGX6110", "Qualcomm Adreno",
    "Qualcomm Adreno 540 GPU", "Qualcomm Adreno 618", "Qualcomm Adreno 680",
    "Qualcomm Adreno 690", "Qualcomm Adreno X Elite", "Qualcomm Adreno X Plus", "VIA Chrome9",
    "nVidia NextGen Ion", "nVidia Quadro M4000", "sin tarjeta gráfica",
];

pub const SCREEN_TECHNOLOGIES: &[&str] = &[
    "2,2K", "2.5K", "2.8K", "2K", "3,2K", "3K", "4K", "FHD+", "Full HD", "HD Ready", "HD+",
    "Missing_value", "QHD", "QHD+", "Retina", "UHD+", "Ultra HD", "WQHD", "WQUXGA", "WQXGA",
    "WQXGA+", "WUXGA", "WUXGA+", "WXGA+",
];
